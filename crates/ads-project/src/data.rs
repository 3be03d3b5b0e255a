//! Two-column data files.
//!
//! Whitespace-separated numbers, one row per line. Lines starting with `#`
//! are comments and blank lines are skipped. Only the first two columns are
//! read.

use std::fmt::Write as _;
use std::path::Path;

use crate::{ProjectError, ProjectResult};

/// Parse rows of `text`; `source` names the input in error messages.
pub fn parse_columns(text: &str, source: &str) -> ProjectResult<Vec<(f64, f64)>> {
    let mut rows = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let data_error = |what: String| ProjectError::Data {
            file: source.to_string(),
            line: index + 1,
            what,
        };
        let mut fields = line.split_whitespace();
        let mut next = || -> ProjectResult<f64> {
            let field = fields
                .next()
                .ok_or_else(|| data_error("expected two columns".to_string()))?;
            field
                .parse::<f64>()
                .map_err(|e| data_error(format!("'{field}': {e}")))
        };
        let x = next()?;
        let y = next()?;
        rows.push((x, y));
    }
    Ok(rows)
}

pub fn read_columns(path: &Path) -> ProjectResult<Vec<(f64, f64)>> {
    let content = std::fs::read_to_string(path)?;
    parse_columns(&content, &path.display().to_string())
}

/// Render rows under a `#` header naming the two columns.
pub fn format_columns(header: (&str, &str), rows: &[(f64, f64)]) -> String {
    let mut out = format!("# {:<24} {}\n", header.0, header.1);
    for (x, y) in rows {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{x:<26e} {y:e}");
    }
    out
}

pub fn write_columns(path: &Path, header: (&str, &str), rows: &[(f64, f64)]) -> ProjectResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format_columns(header, rows))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let text = "# P [MPa]  n [mg/g]\n\n0.1 12.5\n  # mid comment\n0.2\t20.0  99\n";
        let rows = parse_columns(text, "inline").unwrap();
        assert_eq!(rows, vec![(0.1, 12.5), (0.2, 20.0)]);
    }

    #[test]
    fn bad_rows_report_their_line() {
        let err = parse_columns("0.1 1.0\n0.2 abc\n", "iso.dat").unwrap_err();
        match err {
            ProjectError::Data { file, line, .. } => {
                assert_eq!(file, "iso.dat");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_columns("0.1\n", "x").is_err());
    }

    #[test]
    fn formatted_output_parses_back() {
        let rows = vec![(1.5e-3, 42.0), (2.0, 1.0 / 3.0)];
        let text = format_columns(("pressure [MPa]", "loading [mg/g]"), &rows);
        assert!(text.starts_with("# pressure [MPa]"));
        assert_eq!(parse_columns(&text, "out").unwrap(), rows);
    }
}
