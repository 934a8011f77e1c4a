//! CSV export of findings, one row per account:
//! `hash,username,password,group_size`. Rows follow report order.
use std::path::Path;

use anyhow::Result;
use csv::Writer;
use serde::Serialize;

use crate::engine::Finding;

#[derive(Debug, Serialize)]
struct Row<'a> {
    hash: &'a str,
    username: &'a str,
    password: &'a str,
    group_size: usize,
}

pub fn save_findings_csv<P: AsRef<Path>>(findings: &[Finding], path: P) -> Result<()> {
    let mut wtr = Writer::from_path(path)?;
    for f in findings {
        for u in &f.users {
            wtr.serialize(Row {
                hash: f.hash.as_str(),
                username: u,
                password: &f.password,
                group_size: f.users.len(),
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}
