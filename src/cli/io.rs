//! JSON I/O handling for CLI
//!
//! - Input: a documents file holding one JSON object keyed by id
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde_json::{Map, Value};

use super::errors::{CliError, CliResult};

/// Read a documents file: `{ "<id>": { ... }, ... }`
pub fn read_documents(path: &Path) -> CliResult<Map<String, Value>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::io_error(format!("Failed to read {}: {}", path.display(), e)))?;

    match serde_json::from_str(&content)? {
        Value::Object(documents) => Ok(documents),
        _ => Err(CliError::io_error(format!(
            "{} must hold a JSON object keyed by document id",
            path.display()
        ))),
    }
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_documents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docs.json");
        fs::write(&path, r#"{ "a": { "type": "beer" }, "b": {} }"#).unwrap();

        let documents = read_documents(&path).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents["a"]["type"], "beer");
    }

    #[test]
    fn test_read_documents_rejects_array() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("docs.json");
        fs::write(&path, "[1, 2]").unwrap();

        assert!(read_documents(&path).is_err());
    }

    #[test]
    fn test_read_documents_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = read_documents(&temp.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code_str(), "BEERSAMPLE_CLI_IO_ERROR");
    }
}
