//! Flow records and the sheet-to-record conversion.

use calamine::{Data, Range};

use crate::core::error::ValidationError;

// --- Public Row Structs ---

/// One link of the diagram: `value` flows from `source` to `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowRecord {
    pub source: String,
    pub target: String,
    pub value: f64,
    /// Per-row unit, overrides the configured one in labels.
    pub unit: Option<String>,
}

impl FlowRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
            unit: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }
}

/// Column captions from the header row, shown in tooltips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowHeader {
    pub source: String,
    pub target: String,
    pub value: String,
}

impl Default for FlowHeader {
    fn default() -> Self {
        Self {
            source: "From".into(),
            target: "To".into(),
            value: "Value".into(),
        }
    }
}

/// All flows of one sheet, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetFlows {
    pub name: String,
    pub header: FlowHeader,
    pub records: Vec<FlowRecord>,
}

impl SheetFlows {
    /// Check records handed in directly, under the same rules as sheet rows.
    ///
    /// Zero flows are dropped; `row` in errors is the 1-based record index.
    pub fn from_records(name: &str, records: &[FlowRecord]) -> Result<Self, ValidationError> {
        let mut kept = Vec::with_capacity(records.len());
        for (i, r) in records.iter().enumerate() {
            let row = i + 1;
            if r.source.trim().is_empty() || r.target.trim().is_empty() {
                return Err(ValidationError::EmptyNode {
                    sheet: name.to_owned(),
                    row,
                });
            }
            if !r.value.is_finite() {
                return Err(ValidationError::BadValue {
                    sheet: name.to_owned(),
                    row,
                    text: r.value.to_string(),
                });
            }
            if r.value == 0.0 {
                log::debug!("{name}: dropping zero flow {} -> {}", r.source, r.target);
                continue;
            }
            kept.push(r.clone());
        }

        if kept.is_empty() {
            return Err(ValidationError::NoFlows {
                sheet: name.to_owned(),
            });
        }
        Ok(Self {
            name: name.to_owned(),
            header: FlowHeader::default(),
            records: kept,
        })
    }
}

// --- Helpers ---

/// Replace U+2212 MINUS SIGN with an ASCII hyphen.
#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_owned(),
        Some(other) => other.to_string().trim().to_owned(),
    }
}

fn row_is_empty(row: &[Data]) -> bool {
    row.iter().all(|c| match c {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

/// Numeric cell value; strings are parsed as floats.
#[allow(clippy::cast_precision_loss)]
fn parse_value(cell: Option<&Data>) -> Result<f64, String> {
    let v = match cell {
        Some(Data::Float(f)) => *f,
        Some(Data::Int(i)) => *i as f64,
        Some(Data::String(s)) => {
            let mut buf = s.trim().as_bytes().to_vec();
            normalize_unicode_minus(&mut buf);
            lexical_core::parse::<f64>(&buf).map_err(|_| s.clone())?
        }
        Some(other) => return Err(other.to_string()),
        None => return Err(String::new()),
    };
    if v.is_finite() {
        Ok(v)
    } else {
        Err(v.to_string())
    }
}

/// Convert a worksheet range into flows.
///
/// The first row is the header; columns are source, target, value and an
/// optional unit. Blank rows are skipped and zero flows dropped.
pub fn flows_from_range(sheet: &str, range: &Range<Data>) -> Result<SheetFlows, ValidationError> {
    let mut rows = range.rows();
    let first_row = range.start().map_or(1, |(r, _)| r as usize + 1);

    let header_row = rows.next().unwrap_or(&[]);
    let captions: Vec<String> = header_row.iter().map(|c| cell_text(Some(c))).collect();
    let found = captions.iter().filter(|c| !c.is_empty()).count();
    if captions.len() < 3 || captions[..3].iter().any(String::is_empty) {
        return Err(ValidationError::MissingColumns {
            sheet: sheet.to_owned(),
            found,
        });
    }
    let has_unit = captions.get(3).is_some_and(|c| !c.is_empty());
    let header = FlowHeader {
        source: captions[0].clone(),
        target: captions[1].clone(),
        value: captions[2].clone(),
    };

    let mut records = Vec::new();
    for (offset, row) in rows.enumerate() {
        let row_no = first_row + offset + 1;
        if row_is_empty(row) {
            continue;
        }

        let source = cell_text(row.first());
        let target = cell_text(row.get(1));
        if source.is_empty() || target.is_empty() {
            return Err(ValidationError::EmptyNode {
                sheet: sheet.to_owned(),
                row: row_no,
            });
        }

        let value = parse_value(row.get(2)).map_err(|text| ValidationError::BadValue {
            sheet: sheet.to_owned(),
            row: row_no,
            text,
        })?;
        if value == 0.0 {
            log::debug!("{sheet}: dropping zero flow {source} -> {target} (row {row_no})");
            continue;
        }

        let unit = if has_unit {
            Some(cell_text(row.get(3))).filter(|u| !u.is_empty())
        } else {
            None
        };

        log::debug!("{sheet}: {source} -> {target} = {value}");
        records.push(FlowRecord {
            source,
            target,
            value,
            unit,
        });
    }

    if records.is_empty() {
        return Err(ValidationError::NoFlows {
            sheet: sheet.to_owned(),
        });
    }

    Ok(SheetFlows {
        name: sheet.to_owned(),
        header,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Data {
        Data::String(v.to_owned())
    }

    fn sheet(cells: &[&[Data]]) -> Range<Data> {
        let rows = u32::try_from(cells.len()).unwrap();
        let cols = u32::try_from(cells.iter().map(|r| r.len()).max().unwrap()).unwrap();
        let mut range = Range::new((0, 0), (rows - 1, cols - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    #[test]
    fn reads_records_in_row_order() {
        let range = sheet(&[
            &[s("From"), s("To"), s("Value")],
            &[s("Coal"), s("Power"), Data::Float(12.5)],
            &[s("Gas"), s("Power"), Data::Int(7)],
            &[s("Power"), s("Homes"), s("19.5")],
        ]);
        let flows = flows_from_range("A", &range).unwrap();
        let got: Vec<_> = flows
            .records
            .iter()
            .map(|r| (r.source.as_str(), r.target.as_str(), r.value))
            .collect();
        assert_eq!(
            got,
            vec![
                ("Coal", "Power", 12.5),
                ("Gas", "Power", 7.0),
                ("Power", "Homes", 19.5)
            ]
        );
        assert_eq!(flows.header.value, "Value");
    }

    #[test]
    fn skips_blank_and_zero_rows() {
        let range = sheet(&[
            &[s("a"), s("b"), s("c")],
            &[s("x"), s("y"), Data::Float(0.0)],
            &[Data::Empty, s("  "), Data::Empty],
            &[s("x"), s("z"), s("\u{2212}2")],
        ]);
        let flows = flows_from_range("S", &range).unwrap();
        assert_eq!(flows.records, vec![FlowRecord::new("x", "z", -2.0)]);
    }

    #[test]
    fn optional_unit_column() {
        let range = sheet(&[
            &[s("From"), s("To"), s("Value"), s("Unit")],
            &[s("a"), s("b"), Data::Float(1.0), s("t")],
            &[s("a"), s("c"), Data::Float(2.0), Data::Empty],
        ]);
        let flows = flows_from_range("S", &range).unwrap();
        assert_eq!(flows.records[0], FlowRecord::new("a", "b", 1.0).with_unit("t"));
        assert_eq!(flows.records[1].unit, None);
    }

    #[test]
    fn missing_columns() {
        let range = sheet(&[&[s("From"), s("To")], &[s("a"), s("b")]]);
        assert_eq!(
            flows_from_range("S", &range),
            Err(ValidationError::MissingColumns {
                sheet: "S".into(),
                found: 2
            })
        );
    }

    #[test]
    fn bad_value_reports_row() {
        let range = sheet(&[
            &[s("From"), s("To"), s("Value")],
            &[s("a"), s("b"), s("lots")],
        ]);
        assert_eq!(
            flows_from_range("S", &range),
            Err(ValidationError::BadValue {
                sheet: "S".into(),
                row: 2,
                text: "lots".into()
            })
        );
    }

    #[test]
    fn empty_node_and_no_flows() {
        let range = sheet(&[
            &[s("From"), s("To"), s("Value")],
            &[s("a"), Data::Empty, Data::Float(1.0)],
        ]);
        assert!(matches!(
            flows_from_range("S", &range),
            Err(ValidationError::EmptyNode { row: 2, .. })
        ));

        let range = sheet(&[
            &[s("From"), s("To"), s("Value")],
            &[s("a"), s("b"), Data::Int(0)],
        ]);
        assert!(matches!(
            flows_from_range("S", &range),
            Err(ValidationError::NoFlows { .. })
        ));
    }

    #[test]
    fn unicode_minus() {
        let mut b = "\u{2212}3.5".as_bytes().to_vec();
        normalize_unicode_minus(&mut b);
        assert_eq!(b, b"-3.5");
    }

    #[test]
    fn direct_records_drop_zero_flows() {
        let flows = SheetFlows::from_records(
            "api",
            &[FlowRecord::new("A", "B", 5.0), FlowRecord::new("A", "Z", 0.0)],
        )
        .unwrap();
        assert_eq!(flows.records, vec![FlowRecord::new("A", "B", 5.0)]);
        assert_eq!(flows.header, FlowHeader::default());

        assert_eq!(
            SheetFlows::from_records("api", &[FlowRecord::new("A", "B", 0.0)]),
            Err(ValidationError::NoFlows { sheet: "api".into() })
        );
    }

    #[test]
    fn direct_records_reject_non_finite_values() {
        let err = SheetFlows::from_records(
            "api",
            &[FlowRecord::new("A", "C", 1.0), FlowRecord::new("A", "B", f64::NAN)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::BadValue {
                sheet: "api".into(),
                row: 2,
                text: "NaN".into(),
            }
        );
        assert!(matches!(
            SheetFlows::from_records("api", &[FlowRecord::new("A", "B", f64::INFINITY)]),
            Err(ValidationError::BadValue { row: 1, .. })
        ));
    }
}
