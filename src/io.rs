use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

/// Threshold in bytes above which we attempt to use mmap for reading.
/// Callers can override via API; this is a reasonable default.
pub const DEFAULT_MMAP_THRESHOLD_BYTES: u64 = 16 * 1024 * 1024; // 16 MiB

pub type LineIter = Box<dyn Iterator<Item = io::Result<String>> + Send + 'static>;

/// Decide whether to use mmap based on file size and threshold.
pub fn should_use_mmap(file_size_bytes: u64, threshold_bytes: u64) -> bool {
    file_size_bytes >= threshold_bytes
}

/// Iterate lines from a file path using a buffered reader (non-mmap).
/// Invalid UTF-8 is replaced rather than ending the iteration.
pub fn iter_lines_bufread<P: AsRef<Path>>(path: P) -> Result<LineIter> {
    let file = File::open(&path).with_context(|| format!("open {}", path.as_ref().display()))?;
    let iter = BufLines {
        reader: BufReader::new(file),
        buf: Vec::new(),
    };
    Ok(Box::new(iter))
}

struct BufLines {
    reader: BufReader<File>,
    buf: Vec<u8>,
}

impl Iterator for BufLines {
    type Item = io::Result<String>;
    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let bytes = self.buf.strip_suffix(b"\n").unwrap_or(&self.buf);
                Some(Ok(line_from_bytes(bytes)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Iterate lines from a file path using mmap. This avoids copying but still
/// allocates per-returned String; it scans for '\n' boundaries.
pub fn iter_lines_mmap<P: AsRef<Path>>(path: P) -> Result<LineIter> {
    let mmap = map_file(&path)?;
    let iter = MmapLines { mmap, pos: 0 };
    Ok(Box::new(iter))
}

fn map_file<P: AsRef<Path>>(path: P) -> Result<Mmap> {
    let file = File::open(&path).with_context(|| format!("open {}", path.as_ref().display()))?;
    // SAFETY: the map is read-only and dropped before the run ends; a dump
    // truncated underneath us is outside what this tool guards against.
    unsafe { Mmap::map(&file) }.with_context(|| format!("mmap {}", path.as_ref().display()))
}

struct MmapLines {
    mmap: Mmap,
    pos: usize,
}

impl Iterator for MmapLines {
    type Item = io::Result<String>;
    fn next(&mut self) -> Option<Self::Item> {
        let data: &[u8] = &self.mmap;
        if self.pos >= data.len() {
            return None;
        }
        let start = self.pos;
        // Find next newline
        if let Some(off) = memchr::memchr(b'\n', &data[self.pos..]) {
            let end = self.pos + off;
            self.pos = end + 1; // skip newline
            Some(Ok(line_from_bytes(&data[start..end])))
        } else {
            // Last line without trailing newline
            self.pos = data.len();
            Some(Ok(line_from_bytes(&data[start..])))
        }
    }
}

fn line_from_bytes(bytes: &[u8]) -> String {
    // Trim a trailing '\r' if present (handle Windows CRLF)
    let slice = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(slice).into_owned()
}

/// Choose mmap or bufread and return an iterator over lines.
pub fn iter_lines_auto<P: AsRef<Path>>(path: P, threshold_bytes: u64) -> Result<LineIter> {
    let meta =
        std::fs::metadata(&path).with_context(|| format!("stat {}", path.as_ref().display()))?;
    if meta.is_file() && should_use_mmap(meta.len(), threshold_bytes) {
        iter_lines_mmap(path)
    } else {
        iter_lines_bufread(path)
    }
}

/// Read a whole file as text, replacing invalid UTF-8. Files at or above
/// `threshold_bytes` are decoded straight from a memory map.
pub fn read_text_auto<P: AsRef<Path>>(path: P, threshold_bytes: u64) -> Result<String> {
    let meta =
        std::fs::metadata(&path).with_context(|| format!("stat {}", path.as_ref().display()))?;
    if meta.is_file() && should_use_mmap(meta.len(), threshold_bytes) {
        let mmap = map_file(&path)?;
        Ok(String::from_utf8_lossy(&mmap).into_owned())
    } else {
        let bytes =
            std::fs::read(&path).with_context(|| format!("open {}", path.as_ref().display()))?;
        Ok(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}
