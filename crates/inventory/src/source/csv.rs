//! Flat CSV exports (one header row, one record per line).

use crate::error::ParseError;

/// One CSV data row as ordered `(header, cell)` pairs.
///
/// Order is kept so that when several columns map to the same canonical field
/// the leftmost one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    cells: Vec<(String, String)>,
}

impl CsvRow {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    /// Value of the first column whose header equals `header`, ignoring case
    /// and surrounding whitespace.
    pub fn get(&self, header: &str) -> Option<&str> {
        let wanted = header.trim();
        self.cells
            .iter()
            .find(|(h, _)| h.trim().eq_ignore_ascii_case(wanted))
            .map(|(_, v)| v.as_str())
    }
}

/// A decoded CSV file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<CsvRow>,
}

/// Cell text. Bytes that are not UTF-8 (Latin-1 spreadsheet exports) become
/// U+FFFD so one odd cell never costs the rest of the file.
fn cell_text(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Decode CSV bytes. The first row is the header; ragged rows are allowed
/// (missing trailing cells read as empty) and blank rows are skipped.
pub fn parse_csv(bytes: &[u8]) -> Result<CsvTable, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| cell_text(h).trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.byte_records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        if std::str::from_utf8(record.as_slice()).is_err() {
            tracing::warn!(row = line + 1, "csv row is not valid utf-8; replaced bad bytes");
        }
        let cells = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), record.get(i).map(cell_text).unwrap_or_default()))
            .collect();
        rows.push(CsvRow { cells });
    }

    tracing::debug!(columns = headers.len(), rows = rows.len(), "decoded csv");
    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_file_order() {
        let table = parse_csv(
            b"Product Name*,Quantity Received*,Barcode*\n\
              Blue Dream,10,A1\n\
              OG Kush,5,A2\n",
        )
        .unwrap();

        assert_eq!(
            table.headers,
            vec!["Product Name*", "Quantity Received*", "Barcode*"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("product name*"), Some("Blue Dream"));
        assert_eq!(table.rows[1].get("Barcode*"), Some("A2"));
    }

    #[test]
    fn tolerates_ragged_and_blank_rows() {
        let table = parse_csv(b"Product Name,Vendor\nWidget\n,\n\nGadget,Acme\n").unwrap();

        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Vendor"), Some(""));
        assert_eq!(table.rows[1].get("Vendor"), Some("Acme"));
    }

    #[test]
    fn strips_byte_order_mark_from_first_header() {
        let table = parse_csv("\u{feff}Product Name\nWidget\n".as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["Product Name"]);
    }

    #[test]
    fn latin1_cell_keeps_the_rest_of_the_file() {
        let table =
            parse_csv(b"Product Name,Quantity\nBlue Dream,1\nCr\xE8me Gummies,2\nOG Kush,3\n")
                .unwrap();

        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].get("Product Name"), Some("Blue Dream"));
        assert_eq!(table.rows[1].get("Product Name"), Some("Cr\u{FFFD}me Gummies"));
        assert_eq!(table.rows[1].get("Quantity"), Some("2"));
        assert_eq!(table.rows[2].get("Product Name"), Some("OG Kush"));
    }

    #[test]
    fn duplicate_headers_resolve_to_leftmost() {
        let row = CsvRow::from_pairs([("Vendor", "first"), ("vendor", "second")]);
        assert_eq!(row.get("VENDOR"), Some("first"));
    }
}
