//! Counters describing one run.
//!
//! `ParseStats` records what the parsers threw away; `Summary` condenses the
//! loaded groups and the reported findings into the numbers printed by
//! `--summary`.
use crate::credential::NtHash;
use crate::engine::{Engine, Finding};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseStats {
    pub dump_malformed: usize,
    pub pot_malformed: usize,
    /// Dump inputs in which no record-shaped line was found, so the raw text
    /// was parsed instead.
    pub dump_fallbacks: usize,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub accounts: usize,
    pub distinct_hashes: usize,
    pub shared_hashes: usize,
    pub cracked_hashes: usize,
    pub cracked_accounts: usize,
    pub cracked_percentage: String,
    pub empty_password_accounts: usize,
    pub reported_groups: usize,
    pub largest_group: usize,
}

fn pct(n: usize, d: usize) -> String {
    if d == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", (n as f64) / (d as f64) * 100.0)
}

pub fn summarize(engine: &Engine, findings: &[Finding]) -> Summary {
    let mut s = Summary {
        distinct_hashes: engine.groups.len(),
        reported_groups: findings.len(),
        largest_group: findings.iter().map(|f| f.users.len()).max().unwrap_or(0),
        ..Summary::default()
    };
    let empty = NtHash::from_prefix(NtHash::EMPTY_PASSWORD);
    for (hash, users) in engine.groups.iter() {
        s.accounts += users.len();
        if users.len() > 1 {
            s.shared_hashes += 1;
        }
        if engine.cracked.contains_key(hash) {
            s.cracked_hashes += 1;
            s.cracked_accounts += users.len();
        }
        if empty.as_ref() == Some(hash) {
            s.empty_password_accounts += users.len();
        }
    }
    s.cracked_percentage = pct(s.cracked_accounts, s.accounts);
    s
}
