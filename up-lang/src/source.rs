use std::fs;
use std::path::Path;

use crate::error::UpError;

pub const EXTENSION: &str = "up";

/// A program file must exist and carry the `.up` extension.
pub fn validate(path: &Path) -> Result<(), UpError> {
    if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
        return Err(UpError::Source {
            message: format!("'{}' does not have the .{} extension", path.display(), EXTENSION),
        });
    }
    if !path.is_file() {
        return Err(UpError::Source {
            message: format!("'{}' is not a readable file", path.display()),
        });
    }
    Ok(())
}

/// Validates and reads a program, normalizing CRLF line endings.
pub fn load(path: &Path) -> Result<String, UpError> {
    validate(path)?;
    let source = fs::read_to_string(path)?;
    Ok(normalize(source))
}

fn normalize(source: String) -> String {
    if source.contains("\r\n") {
        source.replace("\r\n", "\n")
    } else {
        source
    }
}
