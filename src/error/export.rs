use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Too many rows for a worksheet: {0}")]
    TooManyRows(usize),
}
