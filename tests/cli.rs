use assert_cmd::Command;
use predicates::str::contains;
use std::io::Write;

fn cmd() -> Command {
    Command::cargo_bin("resume-match-cli").unwrap()
}

fn temp_resume() -> tempfile::NamedTempFile {
    let mut resume = tempfile::NamedTempFile::new().unwrap();
    resume.write_all(b"Jane Doe. Rust, SQL, five years.").unwrap();
    resume
}

#[test]
fn missing_resume_is_rejected_without_network() {
    cmd()
        .args([
            "/no/such/resume.pdf",
            "--text",
            "--job-desc",
            "Backend engineer role.",
        ])
        .assert()
        .failure()
        .stderr(contains("resume file not found"));
}

#[test]
fn blank_job_description_is_rejected_without_network() {
    let resume = temp_resume();
    cmd()
        .args([resume.path().to_str().unwrap(), "--text", "--job-desc", "   "])
        .assert()
        .failure()
        .stderr(contains("job description is empty"));
}

#[test]
fn absent_job_description_is_rejected_in_json_mode() {
    let resume = temp_resume();
    cmd()
        .args([resume.path().to_str().unwrap(), "--json"])
        .assert()
        .failure()
        .stderr(contains("job description is empty"));
}

#[test]
fn transport_failure_surfaces_the_cause() {
    let resume = temp_resume();
    // Port 9 (discard) is not served; the connection itself must fail.
    cmd()
        .args([
            resume.path().to_str().unwrap(),
            "--text",
            "--job-desc",
            "Backend engineer role.",
            "--base-url",
            "http://127.0.0.1:9",
        ])
        .assert()
        .failure()
        .stderr(contains("Error:"));
}
