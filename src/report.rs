//! Report rendering.
//!
//! The report body is plain text so it can go to a file unchanged: each group
//! lists its usernames, then one line naming the hash and the recovered
//! password, then a blank separator. The run summary is for the terminal and
//! is colored.
use colored::*;

use crate::engine::Finding;
use crate::stats::{ParseStats, Summary};

/// Emitted instead of a report body when nothing qualifies.
pub const NO_MATCHES: &str = "No matching entries with known passwords were found.";

fn verb(members: usize) -> &'static str {
    if members == 1 { "has" } else { "have" }
}

/// Report lines without terminators, separator blank lines included.
pub fn report_lines(findings: &[Finding]) -> Vec<String> {
    let mut lines = Vec::new();
    for f in findings {
        lines.extend(f.users.iter().cloned());
        lines.push(format!(
            "{} the password and NTLM - {}:{}",
            verb(f.users.len()),
            f.hash,
            f.password
        ));
        lines.push(String::new());
    }
    lines
}

pub fn render_report(findings: &[Finding]) -> String {
    let mut out = String::new();
    for line in report_lines(findings) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn section_header(title: &str) -> String {
    format!("\n{}\n{}\n", title.bold().yellow(), "─".repeat(title.chars().count()))
}

pub fn render_summary(summary: &Summary, parse: &ParseStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "dupe-finder: shared NTLM hash analysis".bold().cyan()));

    out.push_str(&section_header("Accounts"));
    out.push_str(&format!("Accounts: {}\n", summary.accounts));
    out.push_str(&format!("Distinct Hashes: {}\n", summary.distinct_hashes));
    out.push_str(&format!("Shared Hashes: {}\n", summary.shared_hashes));
    out.push_str(&format!("Empty Password Accounts: {}\n", summary.empty_password_accounts));

    out.push_str(&section_header("Cracking"));
    out.push_str(&format!("Cracked Hashes: {}\n", summary.cracked_hashes));
    out.push_str(&format!("Cracked Accounts: {}\n", summary.cracked_accounts));
    out.push_str(&format!("Cracked Percentage: {}\n", summary.cracked_percentage));

    out.push_str(&section_header("Report"));
    if summary.reported_groups == 0 {
        out.push_str(&format!("{}\n", "(No groups reported)".dimmed()));
    } else {
        out.push_str(&format!("Groups Reported: {}\n", summary.reported_groups));
        out.push_str(&format!(
            "Largest Group: {}\n",
            summary.largest_group.to_string().red()
        ));
    }

    if parse.dump_malformed + parse.pot_malformed > 0 || parse.dump_fallbacks > 0 {
        out.push_str(&section_header("Skipped Input"));
        out.push_str(&format!("Malformed Dump Lines: {}\n", parse.dump_malformed));
        out.push_str(&format!("Malformed Dictionary Lines: {}\n", parse.pot_malformed));
        out.push_str(&format!("Dumps Parsed Without Extraction: {}\n", parse.dump_fallbacks));
    }
    out
}
