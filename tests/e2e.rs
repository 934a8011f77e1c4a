use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const SUMMER: &str = "cc36cf7a8fdac60e0c00c7cda5f64b3e";

fn write_lines(path: &Path, lines: &[&str]) {
    let mut f = fs::File::create(path).unwrap();
    for l in lines {
        writeln!(f, "{}", l).unwrap();
    }
}

fn fixtures(dir: &Path, dump: &[&str], cracked: &[&str]) -> (PathBuf, PathBuf) {
    let dump_path = dir.join("DC_dump.txt");
    let cracked_path = dir.join("passwords_from_hashcat.txt");
    write_lines(&dump_path, dump);
    write_lines(&cracked_path, cracked);
    (dump_path, cracked_path)
}

#[test]
fn e2e_reports_shared_cracked_hash() {
    let tmp = tempdir().unwrap();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &[
            "alice:1001:aad3b435b51404eeaad3b435b51404ee:CC36CF7A8FDAC60E0C00C7CDA5F64B3E:::",
            "bob:1002:aad3b435b51404eeaad3b435b51404ee:CC36CF7A8FDAC60E0C00C7CDA5F64B3E:::",
        ],
        &["cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024"],
    );

    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(&dump).arg(&cracked);
    cmd.assert().success().stdout(format!(
        "alice\nbob\nhave the password and NTLM - {SUMMER}:Summer2024\n\n"
    ));
}

#[test]
fn e2e_extracts_lines_from_raw_secretsdump_output() {
    let tmp = tempdir().unwrap();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &[
            "Impacket v0.11.0 - Copyright 2023 Fortra",
            "[*] Dumping Domain Credentials (domain\\uid:rid:lmhash:nthash)",
            "CORP\\alice:1104:aad3b435b51404eeaad3b435b51404ee:cc36cf7a8fdac60e0c00c7cda5f64b3e:::",
            "CORP\\svc_sql:1105:aad3b435b51404eeaad3b435b51404ee:cc36cf7a8fdac60e0c00c7cda5f64b3e:::",
            "CORP\\carol:1106:aad3b435b51404eeaad3b435b51404ee:8846f7eaee8fb117ad06bdd830b7586c:::",
            "[*] Kerberos keys grabbed",
            "CORP\\alice:aes256-cts-hmac-sha1-96:00112233445566778899",
        ],
        &[
            "# hashcat --show",
            "cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024",
            "8846f7eaee8fb117ad06bdd830b7586c:pass:word",
        ],
    );

    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(&dump).arg(&cracked);
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with(format!(
            "CORP\\alice\nCORP\\svc_sql\nhave the password and NTLM - {SUMMER}:Summer2024\n\n"
        )))
        .stdout(predicate::str::contains(
            "CORP\\carol\nhas the password and NTLM - 8846f7eaee8fb117ad06bdd830b7586c:pass:word\n",
        ))
        .stdout(predicate::str::contains("aes256").not());
}

#[test]
fn min_group_size_two_hides_singletons() {
    let tmp = tempdir().unwrap();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &[
            "alice:1001:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::",
            "bob:1002:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::",
            "carol:1003:x:8846f7eaee8fb117ad06bdd830b7586c:::",
        ],
        &[
            "cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024",
            "8846f7eaee8fb117ad06bdd830b7586c:password",
        ],
    );

    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(&dump).arg(&cracked).arg("--min-group-size").arg("2");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("carol").not());
}

#[test]
fn no_matches_is_informational_on_stderr() {
    let tmp = tempdir().unwrap();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &["alice:1001:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::"],
        &["8846f7eaee8fb117ad06bdd830b7586c:password"],
    );

    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(&dump).arg(&cracked).arg("--color").arg("always");
    cmd.assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains(
            "No matching entries with known passwords were found.",
        ))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn output_file_receives_report_and_no_matches_message() {
    let tmp = tempdir().unwrap();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &["alice:1001:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::"],
        &["cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024"],
    );
    let out = tmp.path().join("result.txt");

    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(&dump).arg(&cracked).arg("-o").arg(&out);
    cmd.assert().success().stdout("");
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        format!("alice\nhas the password and NTLM - {SUMMER}:Summer2024\n\n")
    );

    let empty = tmp.path().join("empty.txt");
    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(&dump).arg(&cracked).arg("-m").arg("2").arg("-o").arg(&empty);
    cmd.assert().success();
    assert_eq!(
        fs::read_to_string(&empty).unwrap(),
        "No matching entries with known passwords were found.\n"
    );
}

#[test]
fn csv_export_and_summary() {
    let tmp = tempdir().unwrap();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &[
            "alice:1001:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::",
            "bob:1002:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::",
        ],
        &["cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024"],
    );
    let csv = tmp.path().join("findings.csv");

    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(&dump)
        .arg(&cracked)
        .arg("--csv")
        .arg(&csv)
        .arg("--summary")
        .arg("--color")
        .arg("never");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Cracked Accounts: 2"))
        .stderr(predicate::str::contains("Largest Group: 2"));
    let content = fs::read_to_string(&csv).unwrap();
    assert!(content.starts_with("hash,username,password,group_size\n"));
    assert!(content.contains(&format!("{SUMMER},bob,Summer2024,2")));
}

#[test]
fn mmap_threshold_forces_mapped_reads() {
    let tmp = tempdir().unwrap();
    let dump_lines: Vec<String> = (0..10)
        .map(|i| format!("user{i}:{}:x:8846f7eaee8fb117ad06bdd830b7586c:::", 1000 + i))
        .collect();
    let dump_refs: Vec<&str> = dump_lines.iter().map(String::as_str).collect();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &dump_refs,
        &["8846f7eaee8fb117ad06bdd830b7586c:pw"],
    );

    let mut e = dupefinder::engine::Engine::new();
    e.load_from_file_paths_with_threshold(&[&dump], &[&cracked], 32)
        .unwrap();
    let findings = e.correlate(1);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].users.len(), 10);
}

#[test]
fn missing_dump_file_causes_non_zero_exit() {
    let tmp = tempdir().unwrap();
    let cracked = tmp.path().join("cracked.txt");
    write_lines(&cracked, &["8846f7eaee8fb117ad06bdd830b7586c:pw"]);
    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(tmp.path().join("missing-dump.txt")).arg(&cracked);
    cmd.assert().failure().code(2);
}

#[test]
fn unwritable_output_causes_non_zero_exit() {
    let tmp = tempdir().unwrap();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &["alice:1001:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::"],
        &["cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024"],
    );
    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(&dump)
        .arg(&cracked)
        .arg("-o")
        .arg(tmp.path().join("no/such/dir/result.txt"));
    cmd.assert().failure().code(4);
}

#[cfg(unix)]
#[test]
fn dump_can_be_read_from_stdin() {
    let tmp = tempdir().unwrap();
    let cracked = tmp.path().join("cracked.txt");
    write_lines(&cracked, &["cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024"]);
    let mut cmd = assert_cmd::Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg("/dev/stdin")
        .arg(&cracked)
        .write_stdin("alice:1001:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::\n");
    cmd.assert().success().stdout(format!(
        "alice\nhas the password and NTLM - {SUMMER}:Summer2024\n\n"
    ));
}

#[test]
fn directory_as_dump_fails_at_load() {
    let tmp = tempdir().unwrap();
    let cracked = tmp.path().join("cracked.txt");
    write_lines(&cracked, &["cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024"]);
    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(tmp.path()).arg(&cracked);
    cmd.assert().failure().code(3);
}

#[cfg(unix)]
#[test]
fn output_to_character_device_succeeds() {
    let tmp = tempdir().unwrap();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &["alice:1001:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::"],
        &["cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024"],
    );
    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.arg(&dump).arg(&cracked).arg("-o").arg("/dev/null");
    cmd.assert().success().stdout("");
}

#[test]
fn log_parse_stats_reports_without_verbosity() {
    let tmp = tempdir().unwrap();
    let (dump, cracked) = fixtures(
        tmp.path(),
        &[
            "alice:1001:x:cc36cf7a8fdac60e0c00c7cda5f64b3e:::",
            "bob:1002:x:not-a-hash:::",
        ],
        &["cc36cf7a8fdac60e0c00c7cda5f64b3e:Summer2024", "no separator"],
    );
    let mut cmd = Command::cargo_bin("dupe-finder").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg(&dump)
        .arg(&cracked)
        .arg("--log-parse-stats");
    cmd.assert().success().stderr(predicate::str::contains(
        "parse stats: dump_malformed=1, pot_malformed=1, dump_fallbacks=0",
    ));
}
