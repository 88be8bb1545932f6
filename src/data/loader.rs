use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;
use serde::Deserialize;
use thiserror::Error;

use super::model::{WasteDataset, WasteRecord};

/// Default dataset file, looked up in the working directory at startup.
pub const DEFAULT_DATASET: &str = "datos_de_entrada.csv";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Load-time failures. All of these are fatal: there is no partial load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    DataAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("row {row}, column {column}: '{value}' is not numeric")]
    MalformedData {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Raw row as it appears in the file
// ---------------------------------------------------------------------------

/// The waste columns arrive as text with a comma decimal separator, so they
/// are deserialized as strings and normalized below.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "DEPARTAMENTO")]
    department: String,
    #[serde(rename = "PROVINCIA")]
    province: String,
    #[serde(rename = "DISTRITO")]
    district: String,
    #[serde(rename = "PERIODO")]
    period: i32,
    #[serde(rename = "QRESIDUOS_DOM")]
    household: String,
    #[serde(rename = "QRESIDUOS_NO_DOM")]
    non_household: String,
    #[serde(rename = "QRESIDUOS_MUN")]
    municipal: String,
    #[serde(rename = "POB_TOTAL")]
    population: String,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the waste dataset from a `;`-delimited, ISO-8859-1 encoded CSV.
///
/// Decimal commas in the three waste columns are rewritten to points here,
/// exactly once; downstream code never re-checks or re-normalizes. Loading
/// is a pure function of file contents, so repeated loads of the same file
/// yield equal datasets.
pub fn load(path: &Path) -> Result<WasteDataset, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::DataAccess {
        path: path.to_path_buf(),
        source,
    })?;

    // ISO-8859-1 resolves to the windows-1252 table under WHATWG rules;
    // every byte maps, so decoding cannot fail.
    let (text, _, _) = WINDOWS_1252.decode(&bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRow>().enumerate() {
        let raw = result?;
        records.push(WasteRecord {
            household: parse_decimal(&raw.household, row_no, "QRESIDUOS_DOM")?,
            non_household: parse_decimal(&raw.non_household, row_no, "QRESIDUOS_NO_DOM")?,
            municipal: parse_decimal(&raw.municipal, row_no, "QRESIDUOS_MUN")?,
            population: parse_integer(&raw.population, row_no, "POB_TOTAL")?,
            department: raw.department,
            province: raw.province,
            district: raw.district,
            period: raw.period,
        });
    }

    log::info!("loaded {} rows from {}", records.len(), path.display());
    Ok(WasteDataset::from_records(records))
}

/// Parse a waste quantity: comma decimal separator → point, then `f64`.
fn parse_decimal(s: &str, row: usize, column: &'static str) -> Result<f64, LoadError> {
    s.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map_err(|_| LoadError::MalformedData {
            row,
            column,
            value: s.to_string(),
        })
}

fn parse_integer(s: &str, row: usize, column: &'static str) -> Result<i64, LoadError> {
    s.trim().parse::<i64>().map_err(|_| LoadError::MalformedData {
        row,
        column,
        value: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    const HEADER: &[u8] =
        b"DEPARTAMENTO;PROVINCIA;DISTRITO;PERIODO;QRESIDUOS_DOM;QRESIDUOS_NO_DOM;QRESIDUOS_MUN;POB_TOTAL\n";

    fn write_dataset(rows: &[&[u8]]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(HEADER).unwrap();
        for row in rows {
            file.write_all(row).unwrap();
            file.write_all(b"\n").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn parses_comma_decimals_and_legacy_encoding() {
        // JUN\xCDN is "JUNÍN" in ISO-8859-1.
        let file = write_dataset(&[b"JUN\xCDN;CHANCHAMAYO;LA MERCED;2014;12,5;3,25;15,75;5000"]);
        let ds = load(file.path()).expect("load");

        assert_eq!(ds.len(), 1);
        let r = &ds.records[0];
        assert_eq!(r.department, "JUN\u{cd}N");
        assert_eq!(r.province, "CHANCHAMAYO");
        assert_eq!(r.district, "LA MERCED");
        assert_eq!(r.period, 2014);
        assert_eq!(r.household, 12.5);
        assert_eq!(r.non_household, 3.25);
        assert_eq!(r.municipal, 15.75);
        assert_eq!(r.population, 5000);
    }

    #[test]
    fn missing_file_is_a_data_access_error() {
        let err = load(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoadError::DataAccess { .. }));
    }

    #[test]
    fn non_numeric_waste_value_is_malformed_data() {
        let file = write_dataset(&[b"LIMA;LIMA;ATE;2014;abc;1,0;2,0;100"]);
        let err = load(file.path()).unwrap_err();
        match err {
            LoadError::MalformedData { column, value, .. } => {
                assert_eq!(column, "QRESIDUOS_DOM");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_population_is_malformed_data() {
        let file = write_dataset(&[b"LIMA;LIMA;ATE;2014;1,0;1,0;2,0;n/a"]);
        let err = load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MalformedData {
                column: "POB_TOTAL",
                ..
            }
        ));
    }

    #[test]
    fn loading_twice_yields_equal_datasets() {
        let file = write_dataset(&[
            b"LIMA;LIMA;ATE;2014;1,5;2,5;4,0;1000",
            b"CUSCO;CUSCO;WANCHAQ;2022;3,0;1,0;4,0;2000",
        ]);
        let first = load(file.path()).expect("first load");
        let second = load(file.path()).expect("second load");
        assert_eq!(first, second);
    }
}
