use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("camwire"))
}

fn talk(name: &str, mode: u8, extra: &[u8], message: &str) -> Vec<u8> {
    let mut bytes = vec![170, 0, 0, 0, 0];
    bytes.extend_from_slice(&(name.len() as u16).to_le_bytes());
    bytes.extend_from_slice(name.as_bytes());
    bytes.push(mode);
    bytes.extend_from_slice(extra);
    bytes.extend_from_slice(&(message.len() as u16).to_le_bytes());
    bytes.extend_from_slice(message.as_bytes());
    bytes
}

fn say(name: &str, message: &str) -> Vec<u8> {
    talk(name, 1, &[0x64, 0x00, 0xC8, 0x00, 7], message)
}

fn write_capture(path: &Path, payloads: &[(u64, Vec<u8>)]) {
    let mut bytes = vec![0; 12];
    for (tick, payload) in payloads {
        bytes.extend_from_slice(&tick.to_le_bytes());
        bytes.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        bytes.extend_from_slice(payload);
    }
    fs::write(path, bytes).expect("write capture");
}

fn sample_capture(dir: &Path) -> PathBuf {
    let path = dir.join("session.cam");
    let mut garbled = vec![1, 2, 3, 4, 5, 6];
    garbled.extend(say("Ann", "buried"));
    write_capture(
        &path,
        &[
            (1_000, say("Ann", "hello there")),
            (66_000, talk("Bob", 5, &[7, 0], "channel chatter")),
            (67_000, garbled),
        ],
    );
    path
}

#[test]
fn help_lists_talk() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("talk").and(contains("dialogue")));
    cmd().arg("talk").arg("--help").assert().success();
    cmd()
        .arg("dialogue")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--npcs"));
}

#[test]
fn prints_say_messages() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture(temp.path());

    cmd()
        .arg("talk")
        .arg(input)
        .assert()
        .success()
        .stdout(
            contains("[        0s]")
                .and(contains("Ann: hello there"))
                .and(contains("channel chatter").not())
                .and(contains("buried").not()),
        );
}

#[test]
fn all_modes_and_resync_widen_output() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture(temp.path());

    cmd()
        .arg("talk")
        .arg(input)
        .arg("--all-modes")
        .arg("--resync")
        .assert()
        .success()
        .stdout(
            contains("[      1m5s]")
                .and(contains("Bob: channel chatter"))
                .and(contains("Ann: buried")),
        );
}

#[test]
fn json_lines_carry_talk_fields() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture(temp.path());

    let assert = cmd()
        .arg("talk")
        .arg(&input)
        .arg("--format")
        .arg("json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let lines: Vec<Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json"))
        .collect();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["name"], "Ann");
    assert_eq!(lines[0]["message"], "hello there");
    assert_eq!(lines[0]["time_offset_ms"], 0);
    assert_eq!(lines[0]["offset"], 22);
}

#[test]
fn directory_inputs_are_walked() {
    let temp = TempDir::new().expect("tempdir");
    let nested = temp.path().join("day1");
    fs::create_dir_all(&nested).expect("nested dir");
    write_capture(&nested.join("A.CAM"), &[(0, say("Cid", "from upper case"))]);
    write_capture(&temp.path().join("b.cam"), &[(0, say("Dee", "from lower case"))]);
    fs::write(temp.path().join("notes.txt"), "ignored").expect("write notes");

    cmd()
        .arg("talk")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(contains("Cid: from upper case").and(contains("Dee: from lower case")));
}

#[test]
fn output_file_has_header() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture(temp.path());
    let output = temp.path().join("out").join("talk.txt");

    cmd()
        .arg("talk")
        .arg(input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(contains("hello there").not())
        .stderr(contains("OK:"));

    let written = fs::read_to_string(&output).expect("read output");
    let mut lines = written.lines();
    assert!(lines.next().expect("command line").contains("\"talk\""));
    assert!(lines.next().expect("timestamp").starts_with("Timestamp: "));
    assert!(written.contains("Ann: hello there"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture(temp.path());

    cmd()
        .arg("talk")
        .arg(input)
        .arg("-o")
        .arg(temp.path().join("talk.txt"))
        .arg("--quiet")
        .assert()
        .success()
        .stderr(contains("OK:").not());
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");

    cmd()
        .arg("talk")
        .arg(temp.path().join("missing.cam"))
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn unsupported_extension_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = temp.path().join("capture.pcap");
    fs::write(&input, [0u8; 12]).expect("write input");

    cmd()
        .arg("talk")
        .arg(input)
        .assert()
        .failure()
        .stderr(contains("unsupported input format"));
}

#[test]
fn empty_pattern_match_fails() {
    let temp = TempDir::new().expect("tempdir");
    let pattern = temp.path().join("*.cam");

    cmd()
        .arg("talk")
        .arg(pattern)
        .assert()
        .failure()
        .stderr(contains("no .cam captures found"));
}

#[test]
fn missing_catalog_fails_before_decoding() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture(temp.path());

    cmd()
        .arg("talk")
        .arg(input)
        .arg("--dat")
        .arg(temp.path().join("Tibia.dat"))
        .assert()
        .failure()
        .stderr(contains("cannot read item catalog").and(contains("hint:")));
}

#[test]
fn dialogue_groups_npc_conversations() {
    let temp = TempDir::new().expect("tempdir");
    let first = temp.path().join("a.cam");
    let second = temp.path().join("b.cam");
    write_capture(
        &first,
        &[
            (0, say("Hero", "hi")),
            (1_000, say("Sam", "hello")),
            (2_000, say("Eve", "not in the dialogue")),
            (3_000, say("Hero", "trade")),
            (4_000, say("Sam", "ok")),
            (5_000, say("Tom", "yo")),
            (605_000, say("Tom", "still here")),
            (606_000, talk("Tom", 5, &[7, 0], "channel line")),
        ],
    );
    write_capture(&second, &[(0, say("Tom", "again"))]);

    let assert = cmd()
        .arg("dialogue")
        .arg(&first)
        .arg(&second)
        .arg("--player")
        .arg("hero")
        .arg("--npcs")
        .arg("sam,TOM")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");

    let separator = "-".repeat(80);
    let expected = [
        separator.as_str(),
        "Hero: hi",
        "Sam: hello",
        "Hero: trade",
        "Sam: ok",
        separator.as_str(),
        "Tom: yo",
        separator.as_str(),
        "Tom: still here",
        separator.as_str(),
        "Tom: again",
    ];
    assert_eq!(stdout.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn dialogue_requires_npcs() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_capture(temp.path());

    cmd().arg("dialogue").arg(input).assert().failure();
}
