//! Delimited text input for the CLI.
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};

use densela::{Element, Matrix};

/// Delimiter to use for `path`: the explicit one when given, tab for `.tsv`
/// files, comma otherwise.
pub fn delimiter_for<P: AsRef<Path>>(path: P, explicit: Option<u8>) -> u8 {
    if let Some(delimiter) = explicit {
        return delimiter;
    }
    let is_tsv = path
        .as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.eq_ignore_ascii_case("tsv"))
        .unwrap_or(false);
    if is_tsv {
        b'\t'
    } else {
        b','
    }
}

/// Parse a `--delimiter` argument. Accepts a single ASCII character or the
/// escape `\t`.
pub fn parse_delimiter(value: &str) -> Result<u8> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [b] if b.is_ascii() => Ok(*b),
            _ => Err(anyhow!(
                "Delimiter must be a single ASCII character, got '{}'",
                value
            )),
        },
    }
}

/// Read a headerless delimited file of numbers into an `f64` matrix.
pub fn read_matrix<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Matrix<f64>> {
    read_matrix_as(path, delimiter)
}

/// Read a headerless delimited file into a matrix of `T`.
///
/// Blank cells and values that do not parse as `T` are reported with their
/// 1-based row and column. Rows of differing length are rejected.
pub fn read_matrix_as<T, P>(path: P, delimiter: u8) -> Result<Matrix<T>>
where
    T: Element + FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    P: AsRef<Path>,
{
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(&path)
        .with_context(|| format!("Failed to open matrix file: {}", path.as_ref().display()))?;

    let mut rows = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read row {}", row_idx + 1))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col_idx, value)| {
                value.parse::<T>().with_context(|| {
                    format!(
                        "Invalid value '{}' at row {}, column {}",
                        value,
                        row_idx + 1,
                        col_idx + 1
                    )
                })
            })
            .collect::<Result<Vec<T>>>()?;
        rows.push(row);
    }

    log::debug!(
        "Read {} rows of {} from {}",
        rows.len(),
        T::KIND,
        path.as_ref().display()
    );
    Matrix::from_rows(rows)
        .with_context(|| format!("Malformed matrix in {}", path.as_ref().display()))
}
