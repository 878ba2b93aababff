//! File export of the loaded rows. Works only on what the caller already holds;
//! nothing here talks to the server.

use crate::error::ExportError;
use roster_schema::NurseRecord;
use rust_xlsxwriter::Workbook;
use std::fmt;
use std::path::{Path, PathBuf};

pub const CSV_FILE_NAME: &str = "nurses.csv";
pub const XLSX_FILE_NAME: &str = "nurses.xlsx";
pub const XLSX_SHEET_NAME: &str = "Nurses";

/// Human-readable CSV header.
pub const CSV_HEADERS: [&str; 5] = ["ID", "Name", "License Number", "DOB", "Age"];

/// The worksheet uses the record keys as its header row, including the `id` mirror of `_id`.
pub const XLSX_HEADERS: [&str; 6] = ["_id", "name", "licenseNumber", "dob", "age", "id"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_FILE_NAME,
            ExportFormat::Xlsx => XLSX_FILE_NAME,
        }
    }

    pub fn render(self, rows: &[NurseRecord]) -> Result<Vec<u8>, ExportError> {
        match self {
            ExportFormat::Csv => to_csv(rows),
            ExportFormat::Xlsx => to_xlsx(rows),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("csv"),
            ExportFormat::Xlsx => f.write_str("xlsx"),
        }
    }
}

fn cells(row: &NurseRecord) -> [&str; 5] {
    [
        row.id.as_str(),
        row.name.as_deref().unwrap_or_default(),
        row.license_number.as_deref().unwrap_or_default(),
        row.dob.as_deref().unwrap_or_default(),
        row.age.as_deref().unwrap_or_default(),
    ]
}

/// CSV bytes with a header line even when `rows` is empty.
pub fn to_csv(rows: &[NurseRecord]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for row in rows {
        writer.write_record(cells(row))?;
    }
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}

/// XLSX workbook bytes with a single `Nurses` sheet. Absent fields are left as blank cells.
pub fn to_xlsx(rows: &[NurseRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(XLSX_SHEET_NAME)?;

    for (col, header) in (0u16..).zip(XLSX_HEADERS) {
        sheet.write_string(0, col, header)?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let line = u32::try_from(idx + 1).map_err(|_| ExportError::TooManyRows(rows.len()))?;
        let values = [
            Some(row.id.as_str()),
            row.name.as_deref(),
            row.license_number.as_deref(),
            row.dob.as_deref(),
            row.age.as_deref(),
            Some(row.id.as_str()),
        ];
        for (col, value) in (0u16..).zip(values) {
            if let Some(value) = value {
                sheet.write_string(line, col, value)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Render `rows` and write them to `target`. A directory target gets the format's
/// default file name.
pub fn write_export(
    rows: &[NurseRecord],
    format: ExportFormat,
    target: &Path,
) -> Result<PathBuf, ExportError> {
    let path = if target.is_dir() {
        target.join(format.file_name())
    } else {
        target.to_path_buf()
    };
    std::fs::write(&path, format.render(rows)?)?;
    Ok(path)
}
