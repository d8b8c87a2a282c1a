use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientbookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(String),

    #[error("No header row found in sheet '{0}'")]
    HeaderNotFound(String),

    #[error("Sheet '{0}' has no column matching: {1}")]
    MissingColumn(String, String),

    #[error("Unknown client: {0}")]
    UnknownClient(String),

    #[error("Unsupported workbook path (expected .xlsx file or CSV directory): {0}")]
    UnsupportedSource(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ClientbookError>;
