use std::collections::HashMap;

use log::debug;

use crate::credential::{CrackedEntry, NtHash};

/// Recovered plaintexts keyed by normalized NT hash.
pub type CrackedDictionary = HashMap<NtHash, String>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PotError {
	#[error("no ':' separator: {0}")]
	MissingSeparator(String),
	#[error("hash portion is not an NT hash: {0}")]
	InvalidHash(String),
}

pub fn parse_pot_line(line: &str) -> Result<CrackedEntry, PotError> {
	// hash:password, only first ':' splits; allow empty password
	let (hash, password) = line
		.split_once(':')
		.ok_or_else(|| PotError::MissingSeparator(line.to_string()))?;
	let hash = NtHash::from_prefix(hash.trim()).ok_or_else(|| PotError::InvalidHash(line.to_string()))?;
	Ok(CrackedEntry {
		hash,
		password: password.trim().to_string(),
	})
}

/// Merge dictionary lines into `cracked`, later hashes overwriting earlier
/// ones. Returns the number of rejected lines.
pub fn ingest_cracked_entries<'a, I>(cracked: &mut CrackedDictionary, lines: I) -> usize
where
	I: IntoIterator<Item = &'a str>,
{
	let mut malformed = 0;
	for line in lines {
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		match parse_pot_line(line) {
			Ok(entry) => {
				cracked.insert(entry.hash, entry.password);
			}
			Err(e) => {
				debug!("skipping dictionary line: {}", e);
				malformed += 1;
			}
		}
	}
	malformed
}

pub fn parse_cracked_dictionary<'a, I>(lines: I) -> CrackedDictionary
where
	I: IntoIterator<Item = &'a str>,
{
	let mut cracked = CrackedDictionary::new();
	ingest_cracked_entries(&mut cracked, lines);
	cracked
}
