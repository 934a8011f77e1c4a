//! Pulls pwdump-shaped lines out of noisy tool output.
//!
//! secretsdump prints banners, status lines, Kerberos keys and cleartext
//! secrets around the `user:RID:LM:NT:::` records. The extractor keeps only
//! the record lines so the dump parser never sees the rest. When nothing in
//! the text looks like a record, the text is handed through untouched.
use regex::Regex;

/// Multi-line pattern for `<user>:<digits>:<lm>:<nt>:::` with optional
/// trailing whitespace.
pub const PWDUMP_LINE_PATTERN: &str = r"(?m)^(.*?:[0-9]+:.*?:.*?:::)\s*$";

/// Holds the compiled record pattern. Build it once and reuse it.
#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    pwdump_line: Regex,
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateExtractor {
    pub fn new() -> Self {
        Self {
            pwdump_line: Regex::new(PWDUMP_LINE_PATTERN).expect("PWDUMP_LINE_PATTERN is valid"),
        }
    }

    /// Only the record-shaped substrings of `raw`, in order.
    pub fn find_pwdump_lines<'a>(&self, raw: &'a str) -> Vec<&'a str> {
        self.pwdump_line
            .captures_iter(raw)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// Record-shaped lines of `raw`, or every line of `raw` when none match.
    pub fn extract_candidate_lines<'a>(&self, raw: &'a str) -> Extracted<'a> {
        let found = self.find_pwdump_lines(raw);
        if found.is_empty() {
            Extracted {
                lines: raw.lines().collect(),
                fell_back: true,
            }
        } else {
            Extracted {
                lines: found,
                fell_back: false,
            }
        }
    }
}

/// Candidate lines plus whether the raw-text fallback was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub lines: Vec<&'a str>,
    pub fell_back: bool,
}
