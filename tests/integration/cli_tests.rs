//! These tests drive the built binary the way a user would.

use assert_cmd::prelude::*;
use predicates::prelude::*;

use crate::util::{ENERGY, WATER, listing, sankey_command, write_workbook};

#[test]
fn help_lists_snake_case_flags() {
    sankey_command(&["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--label_text_font_size"))
        .stdout(predicate::str::contains("--node_width"))
        .stdout(predicate::str::contains("--language"));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let book = dir.path().join("missing.xlsx");
    sankey_command(&["--file", book.to_str().unwrap()])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn unknown_sheet_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let book = write_workbook(dir.path(), "Sankey.xlsx", &[("Energy", ENERGY)]);
    let out = dir.path().join("charts");

    sankey_command(&[
        "--file",
        book.to_str().unwrap(),
        "--sheets",
        "Energy",
        "Nope",
        "-o",
        out.to_str().unwrap(),
    ])
    .assert()
    .failure()
    .stderr(predicate::str::contains("sheet `Nope` not found"));
    assert!(!out.exists());
}

#[test]
fn unsupported_language() {
    let dir = tempfile::tempdir().unwrap();
    let book = write_workbook(dir.path(), "Sankey.xlsx", &[("Energy", ENERGY)]);

    sankey_command(&["--file", book.to_str().unwrap(), "--language", "xx_XX"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported language"));
}

#[test]
fn renders_selected_sheet_with_options() {
    let dir = tempfile::tempdir().unwrap();
    let book = write_workbook(
        dir.path(),
        "Flows.xlsx",
        &[("Energy", ENERGY), ("Water", WATER)],
    );
    let out = dir.path().join("out");

    sankey_command(&[
        "-f",
        book.to_str().unwrap(),
        "-s",
        "Water",
        "--output_dir",
        out.to_str().unwrap(),
        "--unit",
        "m³",
        "--decimals",
        "1",
        "--language",
        "en_US",
        "--width",
        "900",
        "--export_title",
        "--title_max_chars",
        "3",
    ])
    .assert()
    .success();

    assert_eq!(
        listing(&out),
        [
            "Flows Water.html",
            "Flows Water.png",
            "Flows Water.svg",
            "Flows.html"
        ]
    );
    let svg = std::fs::read_to_string(out.join("Flows Water.svg")).unwrap();
    assert!(svg.contains(r#"width="900""#));
    assert!(svg.contains("Rain - 1,234.6 m³"));
    assert!(svg.contains(">Wat</text>"));
}
