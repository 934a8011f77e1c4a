//! Destination for the report: the console or a file, chosen once at startup.
//!
//! The file variant buffers through a `BufWriter`, which flushes when dropped,
//! so a file opened for a run that ends early still gets whatever was written.
//! Call [`ReportSink::finish`] on the normal path to surface flush errors.
use std::fs::File;
use std::io::{self, BufWriter, Stdout, Write};
use std::path::Path;

use anyhow::{Context, Result};

#[derive(Debug)]
pub enum ReportSink {
    Console(BufWriter<Stdout>),
    File(BufWriter<File>),
}

impl ReportSink {
    pub fn console() -> Self {
        Self::Console(BufWriter::new(io::stdout()))
    }

    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file =
            File::create(&path).with_context(|| format!("create {}", path.as_ref().display()))?;
        Ok(Self::File(BufWriter::new(file)))
    }

    /// Select the file sink when a path is given, the console otherwise.
    pub fn from_output<P: AsRef<Path>>(output: Option<P>) -> Result<Self> {
        match output {
            Some(path) => Self::create(path),
            None => Ok(Self::console()),
        }
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Self::Console(w) => writeln!(w, "{}", line),
            Self::File(w) => writeln!(w, "{}", line),
        }
    }

    /// Informational message that is not part of the report body. On the
    /// console it goes to stderr; in a file it is written inline.
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        match self {
            Self::Console(_) => {
                eprintln!("{}", message);
                Ok(())
            }
            Self::File(w) => writeln!(w, "{}", message),
        }
    }

    pub fn finish(self) -> io::Result<()> {
        match self {
            Self::Console(mut w) => w.flush(),
            Self::File(mut w) => w.flush(),
        }
    }
}
