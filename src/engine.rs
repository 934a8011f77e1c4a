//! Engine: orchestrates extracting dump records, grouping accounts by NT hash,
//! merging cracked dictionaries, and correlating the two into findings.
//! Provides file-based loaders with optional memory-mapped I/O for large
//! inputs.
//!
//! Typical usage:
//!
//! ```no_run
//! use dupefinder::engine::Engine;
//! # fn main() -> anyhow::Result<()> {
//! let mut engine = Engine::new();
//! engine.load_from_file_paths(&["/path/to/DC_dump.txt"], &["/path/to/cracked.txt"])?;
//! let findings = engine.correlate(2);
//! print!("{}", dupefinder::report::render_report(&findings));
//! # Ok(())
//! # }
//! ```
use std::cmp::Reverse;
use std::path::Path;

use anyhow::Result;
use log::{debug, info};

use crate::credential::NtHash;
use crate::dump::ingest_credential_records;
use crate::extract::CandidateExtractor;
use crate::group::HashGroups;
use crate::io::{DEFAULT_MMAP_THRESHOLD_BYTES, iter_lines_auto, read_text_auto};
use crate::pot::{CrackedDictionary, ingest_cracked_entries};
use crate::stats::ParseStats;

/// One group of accounts sharing a cracked hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub hash: NtHash,
    pub users: Vec<String>,
    pub password: String,
}

/// Keep groups whose hash is cracked and that have at least `min_group_size`
/// members, largest first and then by ascending hash.
pub fn correlate(
    groups: &HashGroups,
    cracked: &CrackedDictionary,
    min_group_size: usize,
) -> Vec<Finding> {
    let mut findings: Vec<Finding> = groups
        .iter()
        .filter(|(_, users)| users.len() >= min_group_size)
        .filter_map(|(hash, users)| {
            cracked.get(hash).map(|password| Finding {
                hash: hash.clone(),
                users: users.to_vec(),
                password: password.clone(),
            })
        })
        .collect();
    findings.sort_by(|a, b| (Reverse(a.users.len()), &a.hash).cmp(&(Reverse(b.users.len()), &b.hash)));
    findings
}

/// Accumulates grouped accounts and cracked hashes across inputs.
#[derive(Debug, Default)]
pub struct Engine {
    pub groups: HashGroups,
    pub cracked: CrackedDictionary,
    pub parse_stats: ParseStats,
    extractor: Option<CandidateExtractor>,
}

impl Engine {
    /// Create an empty engine that pre-filters dumps for record lines.
    pub fn new() -> Self {
        Self {
            extractor: Some(CandidateExtractor::new()),
            ..Self::default()
        }
    }

    /// Create an empty engine that parses dump text as-is.
    pub fn without_extraction() -> Self {
        Self::default()
    }

    fn ingest_dump(&mut self, text: &str) {
        let malformed = match &self.extractor {
            Some(ex) => {
                let extracted = ex.extract_candidate_lines(text);
                if extracted.fell_back {
                    info!("no pwdump lines found, parsing dump text as-is");
                    self.parse_stats.dump_fallbacks += 1;
                } else {
                    debug!("extracted {} pwdump lines", extracted.lines.len());
                }
                ingest_credential_records(&mut self.groups, extracted.lines)
            }
            None => ingest_credential_records(&mut self.groups, text.lines()),
        };
        self.parse_stats.dump_malformed += malformed;
    }

    /// Load inputs already in memory. Later dictionaries override earlier
    /// ones for the same hash.
    pub fn load_from_strings(&mut self, dumps: &[&str], pots: &[&str]) {
        for d in dumps {
            self.ingest_dump(d);
        }
        for p in pots {
            self.parse_stats.pot_malformed += ingest_cracked_entries(&mut self.cracked, p.lines());
        }
    }

    /// Load from file paths. Dumps are read whole (the extractor needs the
    /// full text); dictionaries are streamed line by line. Files at or above
    /// `mmap_threshold_bytes` are memory-mapped.
    pub fn load_from_file_paths_with_threshold<P: AsRef<Path>>(
        &mut self,
        dump_paths: &[P],
        pot_paths: &[P],
        mmap_threshold_bytes: u64,
    ) -> Result<()> {
        for p in dump_paths {
            let text = read_text_auto(p, mmap_threshold_bytes)?;
            self.ingest_dump(&text);
        }
        for p in pot_paths {
            for line in iter_lines_auto(p, mmap_threshold_bytes)? {
                let line = line?;
                self.parse_stats.pot_malformed +=
                    ingest_cracked_entries(&mut self.cracked, [line.as_str()]);
            }
        }
        info!(
            "loaded {} accounts over {} hashes, {} cracked hashes",
            self.groups.account_count(),
            self.groups.len(),
            self.cracked.len()
        );
        Ok(())
    }

    /// Convenience wrapper that uses the default mmap threshold.
    pub fn load_from_file_paths<P: AsRef<Path>>(
        &mut self,
        dump_paths: &[P],
        pot_paths: &[P],
    ) -> Result<()> {
        self.load_from_file_paths_with_threshold(dump_paths, pot_paths, DEFAULT_MMAP_THRESHOLD_BYTES)
    }

    pub fn correlate(&self, min_group_size: usize) -> Vec<Finding> {
        correlate(&self.groups, &self.cracked, min_group_size)
    }
}
