//! CSV output formatting

use serde::Serialize;

use crate::error::{Error, Result};

/// Format data as CSV with a header row
pub fn format_csv<T: Serialize>(data: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in data {
        writer
            .serialize(row)
            .map_err(|e| Error::Other(format!("CSV error: {}", e)))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Other(format!("CSV error: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Other(format!("CSV error: {}", e)))
}
