use std::collections::HashMap;

use crate::credential::{CredentialRecord, NtHash};

/// Usernames grouped by the NT hash they share. Each group keeps the order in
/// which users were first seen and never holds the same username twice.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HashGroups {
    groups: HashMap<NtHash, Vec<String>>,
}

impl HashGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `user` to the group for `hash`. Returns `false` if the user was
    /// already a member.
    pub fn insert(&mut self, hash: NtHash, user: &str) -> bool {
        let members = self.groups.entry(hash).or_default();
        if members.iter().any(|u| u == user) {
            return false;
        }
        members.push(user.to_string());
        true
    }

    pub fn insert_record(&mut self, record: CredentialRecord) -> bool {
        self.insert(record.hash, &record.user)
    }

    pub fn get(&self, hash: &NtHash) -> Option<&[String]> {
        self.groups.get(hash).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NtHash, &[String])> {
        self.groups.iter().map(|(h, users)| (h, users.as_slice()))
    }

    /// Number of distinct hashes.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of (hash, user) memberships across all groups.
    pub fn account_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}
