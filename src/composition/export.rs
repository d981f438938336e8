//! The solo export document.
//!
//! Despite the format name this is plain JSON, not a Standard MIDI File:
//!
//! ```json
//! { "format": "guitar-synth-midi", "version": "1.0", "solo": { ... }, "timestamp": "2024-05-01T12:00:00.000Z" }
//! ```

use super::solo::Solo;
use crate::error::{ConfigurationError, EngineError};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

pub const EXPORT_FORMAT: &str = "guitar-synth-midi";
pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub format: String,
    pub version: String,
    pub solo: Solo,
    /// RFC 3339 / ISO-8601, UTC
    pub timestamp: String,
}

impl ExportDocument {
    pub fn new(solo: Solo, at: SystemTime) -> Self {
        Self {
            format: EXPORT_FORMAT.to_string(),
            version: EXPORT_VERSION.to_string(),
            solo,
            timestamp: humantime::format_rfc3339_millis(at).to_string(),
        }
    }
}

/// Serialize `solo` into a pretty-printed export document stamped now.
pub fn export_solo(solo: &Solo) -> Result<String, EngineError> {
    let document = ExportDocument::new(solo.clone(), SystemTime::now());
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse an export document back into its solo.
pub fn import_solo(json: &str) -> Result<Solo, EngineError> {
    let document: ExportDocument = serde_json::from_str(json)?;
    if document.format != EXPORT_FORMAT || document.version != EXPORT_VERSION {
        return Err(ConfigurationError::UnsupportedExport {
            format: document.format,
            version: document.version,
        }
        .into());
    }
    Ok(document.solo)
}
