//! End-to-end CLI tests for chatdigest.
//!
//! These tests run the actual binaries against temporary transcripts and
//! check exit codes, console output and the files written.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Test Fixtures
// ============================================================================

const TRANSCRIPT: &str = "消息记录（此消息记录为文本格式，不支持重新导入）

2025-03-17 22:10:05 Carol(20003)
昨晚的讨论记录
2025-03-18 10:08:26 Alice(10001)
早上好 @Bob(10002) 今天的会议改到下午
[图片]
2025-03-18 10:09:40 Bob(10002)
收到[表情] SPONSORED
2025-03-19 09:00:00 Bob(10002)
Good morning
";

/// Creates `inputs/group.txt` and a rule file inside a fresh directory.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join("inputs")).unwrap();
    fs::write(dir.path().join("inputs/group.txt"), TRANSCRIPT).unwrap();
    fs::write(dir.path().join("filter_keywords.txt"), "# ads\nSPONSORED\n").unwrap();
    dir
}

fn chatdigest_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatdigest"));
    Command::from_std(cmd)
}

fn path_arg(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Single File
// ============================================================================

mod single_file {
    use super::*;

    #[test]
    fn test_explicit_range_and_output() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "cleaned.txt");

        chatdigest_cmd()
            .args([
                "-f",
                &path_arg(&fixtures, "inputs/group.txt"),
                "-t",
                "2025-03-18",
                "-k",
                &path_arg(&fixtures, "filter_keywords.txt"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Done"))
            .stdout(predicate::str::contains("Reduction"));

        let content = fs::read_to_string(&output).unwrap();
        assert_eq!(content, "早上好 今天的会议改到下午\n收到");
    }

    #[test]
    fn test_derived_output_path() {
        let fixtures = setup_fixtures();

        chatdigest_cmd()
            .args([
                "--file",
                &path_arg(&fixtures, "inputs/group.txt"),
                "--date",
                "2025-03-17=2025-03-18",
                "--keywords",
                &path_arg(&fixtures, "filter_keywords.txt"),
            ])
            .assert()
            .success();

        let derived = fixtures
            .path()
            .join("outputs/cleaned_group_2025-03-17=2025-03-18.txt");
        let content = fs::read_to_string(derived).unwrap();
        assert!(content.starts_with("昨晚的讨论记录"));
        assert!(!content.contains("Good morning"));
    }

    #[test]
    fn test_default_range_is_last_day() {
        let fixtures = setup_fixtures();

        chatdigest_cmd()
            .args([
                "-f",
                &path_arg(&fixtures, "inputs/group.txt"),
                "-k",
                &path_arg(&fixtures, "filter_keywords.txt"),
            ])
            .assert()
            .success();

        let derived = fixtures.path().join("outputs/cleaned_group_2025-03-19.txt");
        assert_eq!(fs::read_to_string(derived).unwrap(), "Good morning");
    }

    #[test]
    fn test_missing_rule_file_is_not_fatal() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.txt");

        chatdigest_cmd()
            .args([
                "-f",
                &path_arg(&fixtures, "inputs/group.txt"),
                "-t",
                "2025-03-18",
                "-k",
                &path_arg(&fixtures, "no_such_rules.txt"),
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stderr(predicate::str::contains("Optional resource not found"))
            .stderr(predicate::str::contains("no_such_rules.txt"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("SPONSORED"));
    }
}

// ============================================================================
// Directory Mode
// ============================================================================

mod directory_mode {
    use super::*;

    #[test]
    fn test_default_directory() {
        let fixtures = setup_fixtures();
        fs::write(
            fixtures.path().join("inputs/other.txt"),
            "2025-04-01 08:00:00 Dan(4)\nhello",
        )
        .unwrap();

        chatdigest_cmd()
            .current_dir(fixtures.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("2/2 files cleaned"));

        let outputs = fixtures.path().join("outputs");
        assert!(outputs.join("cleaned_group_2025-03-19.txt").exists());
        assert!(outputs.join("cleaned_other_2025-04-01.txt").exists());
    }

    #[test]
    fn test_explicit_directory_skips_cleaned_files() {
        let fixtures = setup_fixtures();
        fs::write(fixtures.path().join("inputs/cleaned_old.txt"), "stale").unwrap();

        chatdigest_cmd()
            .args([
                "-d",
                &path_arg(&fixtures, "inputs"),
                "-t",
                "2025-03-18",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("1/1 files cleaned"));
    }

    #[test]
    fn test_output_flag_ignored() {
        let fixtures = setup_fixtures();

        chatdigest_cmd()
            .args(["-d", &path_arg(&fixtures, "inputs"), "-o", "ignored.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("ignored in directory mode"));
    }

    #[test]
    fn test_missing_directory_is_empty_batch() {
        let fixtures = tempdir().unwrap();

        chatdigest_cmd()
            .args(["-d", &path_arg(&fixtures, "nowhere")])
            .assert()
            .success()
            .stdout(predicate::str::contains("0/0 files cleaned"));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_input_file() {
        let fixtures = setup_fixtures();

        chatdigest_cmd()
            .args(["-f", &path_arg(&fixtures, "inputs/missing.txt")])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("❌ Error"))
            .stderr(predicate::str::contains("missing.txt"));
    }

    #[test]
    fn test_invalid_date() {
        let fixtures = setup_fixtures();

        chatdigest_cmd()
            .args([
                "-f",
                &path_arg(&fixtures, "inputs/group.txt"),
                "-t",
                "2025/03/18",
            ])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Invalid date"));

        assert!(!fixtures.path().join("outputs").exists());
    }

    #[test]
    fn test_unknown_flag() {
        chatdigest_cmd()
            .arg("--no-such-flag")
            .assert()
            .failure();
    }
}

// ============================================================================
// Flags
// ============================================================================

mod flags {
    use super::*;

    #[test]
    fn test_help() {
        chatdigest_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--date"))
            .stdout(predicate::str::contains("--keywords"));
    }

    #[test]
    fn test_version() {
        chatdigest_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

// ============================================================================
// Summarize Binary
// ============================================================================

#[cfg(feature = "summarize")]
mod summarize_binary {
    use super::*;

    fn summarize_cmd() -> Command {
        let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_chatdigest-summarize"));
        Command::from_std(cmd)
    }

    #[test]
    fn test_missing_keys_stop_before_any_request() {
        let fixtures = setup_fixtures();

        summarize_cmd()
            .args([
                "-f",
                &path_arg(&fixtures, "inputs/group.txt"),
                "-a",
                "sf",
                "claude",
                "-c",
                &path_arg(&fixtures, "no_keys.toml"),
                "-o",
                &path_arg(&fixtures, "conclusion"),
            ])
            .env_remove("SILICONFLOW_API_KEY")
            .env_remove("OPENAI_API_KEY")
            .env_remove("ANTHROPIC_API_KEY")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains(
                "No API key configured for: siliconflow, anthropic",
            ));

        assert!(!fixtures.path().join("conclusion").exists());
    }

    #[test]
    fn test_malformed_config() {
        let fixtures = setup_fixtures();
        fs::write(fixtures.path().join("bad.toml"), "[siliconflow\napi_key=").unwrap();

        summarize_cmd()
            .args(["-c", &path_arg(&fixtures, "bad.toml")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid config"));
    }

    #[test]
    fn test_unknown_provider() {
        summarize_cmd().args(["-a", "gemini"]).assert().failure();
    }
}
