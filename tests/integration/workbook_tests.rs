//! Library-level pipeline: workbook in, records and files out.

use sankey_sheet::{
    RenderConfig, SankeyError, ValidationError, create_sankeys_from_workbook, read_workbook,
};

use crate::util::{ENERGY, WATER, listing, write_narrow_workbook, write_workbook};

fn config(out: &std::path::Path) -> RenderConfig {
    RenderConfig::builder()
        .unit("kWh")
        .output_dir(out)
        .build()
        .unwrap()
}

#[test]
fn known_rows_become_matching_records() {
    let dir = tempfile::tempdir().unwrap();
    let book = write_workbook(dir.path(), "Sankey.xlsx", &[("Energy", ENERGY)]);

    let sheets = read_workbook(&book, &["Energy"]).unwrap();
    assert_eq!(sheets.len(), 1);
    let got: Vec<(&str, &str, f64)> = sheets[0]
        .records
        .iter()
        .map(|r| (r.source.as_str(), r.target.as_str(), r.value))
        .collect();
    assert_eq!(got, ENERGY);
    assert_eq!(sheets[0].header.source, "From");
}

#[test]
fn all_sheets_in_workbook_order_and_zero_rows_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let book = write_workbook(
        dir.path(),
        "Sankey.xlsx",
        &[("Water", WATER), ("Energy", ENERGY)],
    );

    let sheets = read_workbook(&book, &[] as &[&str]).unwrap();
    let names: Vec<&str> = sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Water", "Energy"]);
    assert_eq!(sheets[0].records.len(), 3);
    assert!(sheets[0].records.iter().all(|r| r.target != "Irrigation"));
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_workbook(dir.path().join("nope.xlsx"), &[] as &[&str]).unwrap_err();
    assert!(matches!(err, SankeyError::FileNotFound(_)));
    assert!(err.to_string().contains("nope.xlsx"));
}

#[test]
fn unknown_sheet_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let book = write_workbook(dir.path(), "Sankey.xlsx", &[("Energy", ENERGY)]);
    let out = dir.path().join("out");

    let err = create_sankeys_from_workbook(&book, &["Energy", "Nope"], &config(&out)).unwrap_err();
    match &err {
        SankeyError::SheetNotFound { sheet, available } => {
            assert_eq!(sheet, "Nope");
            assert_eq!(available, &["Energy"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("`Nope` not found"));
    assert!(!out.exists());
}

#[test]
fn missing_columns_are_a_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let book = write_narrow_workbook(dir.path());
    let out = dir.path().join("out");

    let err = create_sankeys_from_workbook(&book, &[] as &[&str], &config(&out)).unwrap_err();
    assert!(matches!(
        err,
        SankeyError::Validation(ValidationError::MissingColumns { found: 2, .. })
    ));
    assert!(!out.exists());
}

#[test]
fn writes_png_svg_html_per_sheet_and_overview() {
    let dir = tempfile::tempdir().unwrap();
    let book = write_workbook(
        dir.path(),
        "Sankey.xlsx",
        &[("Energy", ENERGY), ("Water", WATER)],
    );
    let out = dir.path().join("out");

    let charts = create_sankeys_from_workbook(&book, &[] as &[&str], &config(&out)).unwrap();
    assert_eq!(charts.len(), 2);
    assert_eq!(
        listing(&out),
        [
            "Sankey Energy.html",
            "Sankey Energy.png",
            "Sankey Energy.svg",
            "Sankey Water.html",
            "Sankey Water.png",
            "Sankey Water.svg",
            "Sankey.html",
        ]
    );

    let png = std::fs::read(out.join("Sankey Energy.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

    let svg = std::fs::read_to_string(out.join("Sankey Water.svg")).unwrap();
    assert!(svg.contains(r#"width="1400" height="600""#));
    assert!(svg.contains("Rain - 1.234,57 kWh"));

    let overview = std::fs::read_to_string(out.join("Sankey.html")).unwrap();
    assert!(overview.contains("<h2>Energy</h2>"));
    assert!(overview.contains("<h2>Water</h2>"));
}

#[test]
fn identical_runs_give_identical_svg_and_html() {
    let dir = tempfile::tempdir().unwrap();
    let book = write_workbook(dir.path(), "Sankey.xlsx", &[("Energy", ENERGY)]);
    let (a, b) = (dir.path().join("a"), dir.path().join("b"));

    create_sankeys_from_workbook(&book, &["Energy"], &config(&a)).unwrap();
    create_sankeys_from_workbook(&book, &["Energy"], &config(&b)).unwrap();

    for name in ["Sankey Energy.svg", "Sankey Energy.html", "Sankey.html"] {
        let left = std::fs::read(a.join(name)).unwrap();
        let right = std::fs::read(b.join(name)).unwrap();
        assert_eq!(left, right, "{name} differs between runs");
    }
}
