//! Workbook access: open the file, pick sheets, hand ranges to `data`.

use std::path::Path;

use calamine::{Reader, open_workbook_auto};

use crate::core::{
    data::{SheetFlows, flows_from_range},
    error::SankeyError,
};

/// Read flows from `sheets` of the workbook at `path` (all sheets when
/// `sheets` is empty).
///
/// Every requested name is checked against the workbook before any sheet
/// is parsed, so an unknown name fails fast.
pub fn read_workbook<S: AsRef<str>>(
    path: impl AsRef<Path>,
    sheets: &[S],
) -> Result<Vec<SheetFlows>, SankeyError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(SankeyError::FileNotFound(path.to_path_buf()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let available = workbook.sheet_names();

    let selected: Vec<String> = if sheets.is_empty() {
        available.clone()
    } else {
        let mut picked = Vec::with_capacity(sheets.len());
        for name in sheets {
            let name = name.as_ref();
            if !available.iter().any(|a| a == name) {
                return Err(SankeyError::SheetNotFound {
                    sheet: name.to_owned(),
                    available,
                });
            }
            picked.push(name.to_owned());
        }
        picked
    };

    let mut out = Vec::with_capacity(selected.len());
    for name in selected {
        let range = workbook.worksheet_range(&name)?;
        let flows = flows_from_range(&name, &range)?;
        log::info!("{name}: {} flow(s)", flows.records.len());
        out.push(flows);
    }
    Ok(out)
}
