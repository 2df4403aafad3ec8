use std::io;

use thiserror::Error;

/// Failure while reading the alumni source file.
///
/// Any of these aborts the whole load: the caller surfaces the message and
/// continues with an empty record set.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("sheet '{0}' not found in workbook")]
    SheetNotFound(String),
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: cannot parse salary '{value}'")]
    Salary { row: usize, value: String },
    #[error("unsupported file extension: {0}")]
    UnsupportedFormat(String),
    #[error("source has no header row")]
    Empty,
    #[error("row {row}: unterminated quoted field")]
    Csv { row: usize },
}

/// Rejection of an add-record submission. The message is shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Field {0} harus diisi!")]
    MissingField(&'static str),
    #[error("Program Studi '{0}' tidak dikenal")]
    InvalidProgram(String),
    #[error("Format gaji tidak valid! Masukkan angka saja.")]
    InvalidSalary,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),
    #[error("sheet name cannot be empty")]
    EmptySheetName,
}
