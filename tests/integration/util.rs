use std::{
    path::{Path, PathBuf},
    process::Command,
};

use rust_xlsxwriter::Workbook;

pub type Row<'a> = (&'a str, &'a str, f64);

const BIN_PATH: &str = env!("CARGO_BIN_EXE_sankey-sheet");

/// Returns the [`Command`] of a binary invocation with logging kept quiet.
pub fn sankey_command(args: &[&str]) -> Command {
    let mut cmd = Command::new(BIN_PATH);
    cmd.args(["--log_level", "warn"]).args(args);
    cmd
}

/// The energy example used across tests.
pub const ENERGY: &[Row<'static>] = &[
    ("Coal", "Power", 30.0),
    ("Gas", "Power", 20.0),
    ("Gas", "Heat", 10.0),
    ("Power", "Homes", 35.0),
    ("Power", "Losses", 15.0),
];

pub const WATER: &[Row<'static>] = &[
    ("Rain", "River", 1234.5678),
    ("River", "Sea", 1000.0),
    ("River", "Irrigation", 0.0),
    ("River", "Drinking", 234.5678),
];

/// Write `sheets` to `dir/name`, each with a `From`/`To`/`Value` header.
pub fn write_workbook(dir: &Path, name: &str, sheets: &[(&str, &[Row<'_>])]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    for (sheet, rows) in sheets {
        let ws = workbook.add_worksheet();
        ws.set_name(*sheet).unwrap();
        for (col, caption) in ["From", "To", "Value"].into_iter().enumerate() {
            ws.write_string(0, col as u16, caption).unwrap();
        }
        for (i, (source, target, value)) in rows.iter().enumerate() {
            let r = i as u32 + 1;
            ws.write_string(r, 0, *source).unwrap();
            ws.write_string(r, 1, *target).unwrap();
            ws.write_number(r, 2, *value).unwrap();
        }
    }
    workbook.save(&path).unwrap();
    path
}

/// A single sheet with only two header columns.
pub fn write_narrow_workbook(dir: &Path) -> PathBuf {
    let path = dir.join("Narrow.xlsx");
    let mut workbook = Workbook::new();
    let ws = workbook.add_worksheet();
    ws.set_name("Broken").unwrap();
    ws.write_string(0, 0, "From").unwrap();
    ws.write_string(0, 1, "To").unwrap();
    ws.write_string(1, 0, "A").unwrap();
    ws.write_string(1, 1, "B").unwrap();
    workbook.save(&path).unwrap();
    path
}

/// Sorted file names in `dir`.
pub fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
