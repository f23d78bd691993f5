//! FILENAME: ingest/src/xlsx_reader.rs

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use once_cell::sync::Lazy;
use regex::Regex;

use dataset::{CellValue, Dataset};

use crate::error::IngestError;

/// File name of the published survey workbook.
pub const DEFAULT_WORKBOOK: &str = "2023_Kommunala_resultat_NTU_2017-2022.xlsx";

/// Survey years present in the workbook, in the caller-facing hyphen form.
/// The workbook itself uses an en-dash; `dataset_for_year` normalizes.
pub const ACCEPTED_YEARS: [&str; 4] = ["2016-2017", "2018-2019", "2020-2021", "2021-2022"];

/// Sheet holding the table-of-contents listing.
const CONTENTS_SHEET: &str = "Innehållsförteckning";

/// Table headings in the contents sheet, e.g.
/// "Tabell 2.12 Utsatthet för misshandel".
static TABLE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^Tabell (\d\.\d*) (.*)$").expect("table heading pattern"));

/// Contents listing block: column C, Excel rows 7-66.
const CONTENTS_COLUMN: u32 = 2;
const CONTENTS_FIRST_ROW: u32 = 6;
const CONTENTS_LAST_ROW: u32 = 65;

/// Every "Tabell x.y" sheet keeps its data in the same fixed block:
/// header row at Excel row 5 (years from column C), region rows below it
/// down to Excel row 338, labels in column B.
const TABLE_HEADER_ROW: u32 = 4;
const TABLE_FIRST_DATA_ROW: u32 = 5;
const TABLE_LAST_DATA_ROW: u32 = 337;
const TABLE_LABEL_COLUMN: u32 = 1;
const TABLE_FIRST_YEAR_COLUMN: u32 = 2;

/// Loads the default crime-exposure table: series 2 for the latest year
/// the exposure questions cover.
pub fn crime_exposure_dataset(path: &Path) -> Result<Dataset, IngestError> {
    dataset_for_year(path, "2020-2021", 2)
}

/// Loads the default crime-fear table: series 3 for the latest year the
/// fear-of-crime questions cover.
pub fn crime_fear_dataset(path: &Path) -> Result<Dataset, IngestError> {
    dataset_for_year(path, "2021-2022", 3)
}

/// Builds a dataset with regions as rows and one column per statistic of
/// the given table series (2 = exposure, 3 = fear), taking each table's
/// column for `year`. Confidence-interval columns are never read; only
/// the requested year column is taken from each table.
pub fn dataset_for_year(path: &Path, year: &str, series: u32) -> Result<Dataset, IngestError> {
    if !matches!(series, 2 | 3) {
        return Err(IngestError::InvalidFormat(format!(
            "Unknown table series: {} (expected 2 or 3)",
            series
        )));
    }
    if !ACCEPTED_YEARS.contains(&year) {
        return Err(IngestError::InvalidFormat(format!(
            "Unknown survey year: {}",
            year
        )));
    }
    let year = year.replace('-', "–");

    let mut workbook: Xlsx<_> = open_workbook(path)?;

    let descriptions = read_table_descriptions(&mut workbook)?;
    let prefix = format!("{}.", series);
    let tables: Vec<(String, String)> = descriptions
        .into_iter()
        .filter(|(id, _)| id.starts_with(&prefix))
        .collect();
    if tables.is_empty() {
        return Err(IngestError::InvalidFormat(format!(
            "Workbook lists no tables for series {}",
            series
        )));
    }

    let mut row_labels: Vec<String> = Vec::new();
    let mut columns: Vec<String> = Vec::with_capacity(tables.len());
    let mut table_values: Vec<HashMap<String, CellValue>> = Vec::with_capacity(tables.len());

    for (i, (id, description)) in tables.iter().enumerate() {
        let sheet_name = format!("Tabell {}", id);
        let range = worksheet(&mut workbook, &sheet_name)?;
        let rows = read_year_column(&range, &sheet_name, &year)?;

        // The first table defines the row universe; later tables are
        // joined by label, holes become missing values.
        if i == 0 {
            row_labels = rows.iter().map(|(label, _)| label.clone()).collect();
        }
        columns.push(description.clone());
        table_values.push(rows.into_iter().collect());
    }

    let values: Vec<Vec<CellValue>> = row_labels
        .iter()
        .map(|label| {
            table_values
                .iter()
                .map(|table| table.get(label).copied().unwrap_or(CellValue::Missing))
                .collect()
        })
        .collect();

    log::debug!(
        "Loaded {} statistics for {} regions (series {}, year {})",
        columns.len(),
        row_labels.len(),
        series,
        year
    );

    Ok(Dataset::new(row_labels, columns, values)?)
}

fn worksheet(workbook: &mut Xlsx<impl std::io::Read + std::io::Seek>, name: &str) -> Result<Range<Data>, IngestError> {
    if !workbook.sheet_names().iter().any(|s| s == name) {
        return Err(IngestError::SheetNotFound(name.to_string()));
    }
    workbook
        .worksheet_range(name)
        .map_err(|e| IngestError::InvalidFormat(e.to_string()))
}

/// Reads the contents sheet and returns (table id, description) pairs in
/// listing order, e.g. ("2.1", "Utsatthet för brott totalt").
fn read_table_descriptions(
    workbook: &mut Xlsx<impl std::io::Read + std::io::Seek>,
) -> Result<Vec<(String, String)>, IngestError> {
    let range = worksheet(workbook, CONTENTS_SHEET)?;

    let mut descriptions = Vec::new();
    for row in CONTENTS_FIRST_ROW..=CONTENTS_LAST_ROW {
        let Some(Data::String(text)) = range.get_value((row, CONTENTS_COLUMN)) else {
            continue;
        };
        if let Some(captures) = TABLE_HEADING.captures(text.trim()) {
            descriptions.push((captures[1].to_string(), captures[2].to_string()));
        }
    }
    Ok(descriptions)
}

/// Reads one table sheet's fixed block and returns (region label, value)
/// pairs for the requested year column, in sheet order.
fn read_year_column(
    range: &Range<Data>,
    sheet_name: &str,
    year: &str,
) -> Result<Vec<(String, CellValue)>, IngestError> {
    let year_column = find_year_column(range, year).ok_or_else(|| {
        IngestError::InvalidFormat(format!(
            "Sheet '{}' has no column for year {}",
            sheet_name, year
        ))
    })?;

    let mut rows = Vec::new();
    for row in TABLE_FIRST_DATA_ROW..=TABLE_LAST_DATA_ROW {
        let label = match range.get_value((row, TABLE_LABEL_COLUMN)) {
            Some(Data::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            _ => continue,
        };
        let value = range
            .get_value((row, year_column))
            .map(coerce_numeric)
            .unwrap_or(CellValue::Missing);
        rows.push((label, value));
    }
    Ok(rows)
}

/// Scans the header row for the requested year label.
fn find_year_column(range: &Range<Data>, year: &str) -> Option<u32> {
    let last_column = range.end().map(|(_, c)| c)?;
    (TABLE_FIRST_YEAR_COLUMN..=last_column).find(|&column| {
        matches!(
            range.get_value((TABLE_HEADER_ROW, column)),
            Some(Data::String(s)) if s.trim() == year
        )
    })
}

/// Numeric coercion: numbers load as numbers; everything else (the
/// survey's ".."/"." suppression markers, notes, blanks) becomes missing.
/// Numeric text is parsed rather than discarded.
fn coerce_numeric(value: &Data) -> CellValue {
    match value {
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) => match s.trim().parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Missing,
        },
        _ => CellValue::Missing,
    }
}
