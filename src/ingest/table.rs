//! Raw tabular input.
//!
//! Reads a delimited text export into header-keyed rows. Source systems
//! differ in delimiter (`,` / `;` / tab) and encoding (UTF-8 / Latin-1),
//! so both are detected rather than configured.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::ReaderBuilder;

use super::error::{IngestError, IngestResult};

/// A table of string cells keyed by column header.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    /// Builds a table from headers and rows of cells (in header order).
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|cells| headers.iter().cloned().zip(cells).collect())
            .collect();
        Self { headers, rows }
    }

    /// Parses CSV bytes, sniffing delimiter and encoding.
    pub fn from_bytes(bytes: &[u8]) -> IngestResult<Self> {
        let text = decode(bytes);
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        let delimiter = sniff_delimiter(text);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), value.trim().to_string());
                }
            }

            if row.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Reads and parses a CSV file.
    pub fn from_path(path: impl AsRef<Path>) -> IngestResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|error| IngestError::Io {
            source_name: path.display().to_string(),
            error,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Column headers in source order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Whether a column with this exact header exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// First of `candidates` present as a column.
    pub fn first_column<'a>(&self, candidates: &[&'a str]) -> Option<&'a str> {
        candidates.iter().copied().find(|c| self.has_column(c))
    }

    /// Data rows.
    pub fn rows(&self) -> &[HashMap<String, String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Non-empty trimmed cell value of `column` in `row`.
pub fn cell<'a>(row: &'a HashMap<String, String>, column: &str) -> Option<&'a str> {
    row.get(column)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

/// Parses a numeric cell.
///
/// Accepts `12.5`, `12,5`, `1.234,5`, `1,234.5` and a trailing `%`.
/// Returns `None` for blank, non-numeric, or non-finite values.
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim().trim_end_matches('%').trim();
    if s.is_empty() {
        return None;
    }

    let normalized = match (s.rfind(','), s.rfind('.')) {
        // 1.234,5
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        // 1,234.5
        (Some(_), Some(_)) => s.replace(',', ""),
        // 12,5
        (Some(_), None) => s.replace(',', "."),
        _ => s.to_string(),
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// UTF-8 if valid, otherwise Latin-1 (every byte maps to one code point).
fn decode(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Picks the most frequent of `;`, `,`, tab in the header line, outside quotes.
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    let mut counts = [(b',', 0usize), (b';', 0), (b'\t', 0)];
    let mut in_quotes = false;

    for ch in header.bytes() {
        if ch == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        for (delim, count) in counts.iter_mut() {
            if ch == *delim {
                *count += 1;
            }
        }
    }

    counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(delim, _)| *delim)
        .unwrap_or(b',')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_separated() {
        let table = RawTable::from_bytes(b"order_id,qty\nOP1,10\nOP2,20\n").unwrap();
        assert_eq!(table.headers(), ["order_id", "qty"]);
        assert_eq!(table.len(), 2);
        assert_eq!(cell(&table.rows()[1], "qty"), Some("20"));
    }

    #[test]
    fn test_semicolon_and_blank_rows() {
        let table = RawTable::from_bytes(b"Ordem;Material\n1001;M-1\n;\n1002;M-2\n").unwrap();
        assert!(table.has_column("Ordem"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_latin1_fallback() {
        // "Descrição" in Latin-1: ç = 0xE7, ã = 0xE3
        let bytes = b"Recurso;Descri\xe7\xe3o breve\nR1;Prensa\n";
        let table = RawTable::from_bytes(bytes).unwrap();
        assert!(table.has_column("Descrição breve"));
        assert_eq!(cell(&table.rows()[0], "Descrição breve"), Some("Prensa"));
    }

    #[test]
    fn test_bom_and_quoted_delimiters() {
        let table = RawTable::from_bytes("\u{feff}\"a,b\";c;d\n1;2;3\n".as_bytes()).unwrap();
        assert_eq!(table.headers(), ["a,b", "c", "d"]);
    }

    #[test]
    fn test_first_column() {
        let table = RawTable::new(vec!["Ctro.trab.".into()], vec![]);
        assert_eq!(
            table.first_column(&["Centro de trabalho", "Ctro.trab."]),
            Some("Ctro.trab.")
        );
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number("12,5"), Some(12.5));
        assert_eq!(parse_number("1.234,5"), Some(1234.5));
        assert_eq!(parse_number("1,234.5"), Some(1234.5));
        assert_eq!(parse_number(" 85% "), Some(85.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = RawTable::from_path("/nonexistent/orders.csv").unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
