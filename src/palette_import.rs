//! Palette import from a spreadsheet export.
//!
//! Reads a CSV file with `r`, `g` and `b` columns (any order, other columns
//! ignored) and produces the `palette:` block of `config.yaml`. Rows with a
//! blank color cell are skipped. Cells may be quoted and may carry a
//! fractional part (`12.0`), which is truncated.

use pixel_pipeline::Rgb;
use std::fmt::Write;
use std::path::Path;

use crate::error::ImportError;

const COLUMNS: [&str; 3] = ["r", "g", "b"];

/// Parse CSV content into palette colors, in row order.
pub fn parse_palette_csv(content: &str) -> Result<Vec<Rgb>, ImportError> {
    let mut lines = content.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let header: Vec<String> = match lines.next() {
        Some((_, line)) => split_row(line).map(|c| c.to_ascii_lowercase()).collect(),
        None => return Err(ImportError::MissingColumn(COLUMNS[0])),
    };

    let mut positions = [0usize; 3];
    for (pos, name) in positions.iter_mut().zip(COLUMNS) {
        *pos = header
            .iter()
            .position(|h| h == name)
            .ok_or(ImportError::MissingColumn(name))?;
    }

    let mut colors = Vec::new();
    for (idx, line) in lines {
        let cells: Vec<&str> = split_row(line).collect();
        let values: Vec<&str> = positions
            .iter()
            .map(|&p| cells.get(p).copied().unwrap_or(""))
            .collect();
        if values.iter().any(|v| v.is_empty()) {
            tracing::debug!(line = idx + 1, "Skipping row with blank color cell");
            continue;
        }

        let mut channels = [0u8; 3];
        for ((channel, value), column) in channels.iter_mut().zip(&values).zip(COLUMNS) {
            *channel = parse_channel(value).ok_or_else(|| ImportError::InvalidValue {
                line: idx + 1,
                column,
                value: value.to_string(),
            })?;
        }
        colors.push(Rgb::from(channels));
    }

    Ok(colors)
}

/// Read and parse a CSV file.
pub fn import_palette_file(path: &Path) -> Result<Vec<Rgb>, ImportError> {
    let content = std::fs::read_to_string(path)?;
    parse_palette_csv(&content)
}

/// Render colors as a `palette:` YAML block.
pub fn palette_yaml(colors: &[Rgb]) -> String {
    let mut out = String::from("palette:\n");
    for c in colors {
        let _ = writeln!(out, "  - [{}, {}, {}]", c.r, c.g, c.b);
    }
    out
}

/// Split one CSV line into trimmed cells. A double-quoted cell may contain
/// commas; its quotes are stripped.
fn split_row(line: &str) -> impl Iterator<Item = &str> {
    let mut cells = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                cells.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    cells.push(&line[start..]);
    cells
        .into_iter()
        .map(|cell| cell.trim().trim_matches('"').trim())
}

fn parse_channel(value: &str) -> Option<u8> {
    let v: f64 = value.parse().ok()?;
    if !(0.0..256.0).contains(&v) {
        return None;
    }
    Some(v.trunc() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic() {
        let csv = "name,r,g,b\nblack,0,0,0\nred,255,0,0\n";
        assert_eq!(
            parse_palette_csv(csv).unwrap(),
            vec![Rgb::new(0, 0, 0), Rgb::new(255, 0, 0)]
        );
    }

    #[test]
    fn test_column_order_and_case() {
        let csv = "B,G,R\n1,2,3\n";
        assert_eq!(parse_palette_csv(csv).unwrap(), vec![Rgb::new(3, 2, 1)]);
    }

    #[test]
    fn test_blank_rows_skipped() {
        let csv = "r,g,b,note\n10,20,30,x\n,,,section\n40,,60,half\n\n\"70\",80.0,90,ok\n";
        assert_eq!(
            parse_palette_csv(csv).unwrap(),
            vec![Rgb::new(10, 20, 30), Rgb::new(70, 80, 90)]
        );
    }

    #[test]
    fn test_quoted_comma_stays_in_one_cell() {
        let csv = "name,r,g,b\n\"Red, dark\",128,0,0\n\"Blue\",0,0,\"200\"\n";
        assert_eq!(
            parse_palette_csv(csv).unwrap(),
            vec![Rgb::new(128, 0, 0), Rgb::new(0, 0, 200)]
        );

        let header = "\"tone, shade\",r,g,b\nx,1,2,3\n";
        assert_eq!(parse_palette_csv(header).unwrap(), vec![Rgb::new(1, 2, 3)]);
    }

    #[test]
    fn test_missing_column() {
        let err = parse_palette_csv("r,g,blue\n1,2,3\n").unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn("b")));
        assert_eq!(err.to_string(), "Could not find column 'b'");

        assert!(matches!(
            parse_palette_csv("").unwrap_err(),
            ImportError::MissingColumn(_)
        ));
    }

    #[test]
    fn test_invalid_value() {
        let err = parse_palette_csv("r,g,b\n1,2,3\n1,300,3\n").unwrap_err();
        match err {
            ImportError::InvalidValue {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 3);
                assert_eq!(column, "g");
                assert_eq!(value, "300");
            }
            other => panic!("Expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_yaml_block_loads_as_config() {
        let yaml = palette_yaml(&[Rgb::new(1, 2, 3), Rgb::new(255, 255, 255)]);
        assert_eq!(yaml, "palette:\n  - [1, 2, 3]\n  - [255, 255, 255]\n");

        let config = crate::models::AppConfig::parse(&yaml).unwrap();
        assert_eq!(config.build_palette().unwrap().len(), 2);
    }
}
