use log::debug;

use crate::credential::{CredentialRecord, NtHash};
use crate::group::HashGroups;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum DumpError {
    #[error("fewer than 4 fields: {0}")]
    TooFewFields(String),
    #[error("fourth field is not an NT hash: {0}")]
    InvalidHash(String),
}

/// Blank lines and `#` comments carry no record.
fn is_ignored(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

pub fn parse_dump_line(line: &str) -> Result<CredentialRecord, DumpError> {
    // Expected: user:RID:LM:NT:::; only user and NT are kept
    let mut parts = line.split(':');
    let user = parts
        .next()
        .ok_or_else(|| DumpError::TooFewFields(line.to_string()))?
        .trim();
    let nt = parts
        .nth(2)
        .ok_or_else(|| DumpError::TooFewFields(line.to_string()))?
        .trim();
    let hash = NtHash::from_prefix(nt).ok_or_else(|| DumpError::InvalidHash(line.to_string()))?;
    Ok(CredentialRecord {
        user: user.to_string(),
        hash,
    })
}

/// Feed dump lines into `groups`, returning how many non-blank, non-comment
/// lines were rejected.
pub fn ingest_credential_records<'a, I>(groups: &mut HashGroups, lines: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let mut malformed = 0;
    for line in lines {
        let line = line.trim();
        if is_ignored(line) {
            continue;
        }
        match parse_dump_line(line) {
            Ok(record) => {
                groups.insert_record(record);
            }
            Err(e) => {
                debug!("skipping dump line: {}", e);
                malformed += 1;
            }
        }
    }
    malformed
}

/// Group every account in `lines` by NT hash.
pub fn parse_credential_records<'a, I>(lines: I) -> HashGroups
where
    I: IntoIterator<Item = &'a str>,
{
    let mut groups = HashGroups::new();
    ingest_credential_records(&mut groups, lines);
    groups
}
