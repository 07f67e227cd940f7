//! Validation functions for paths and pointer strings.

use crate::types::PathStep;
use crate::PathError;

/// Maximum allowed pointer string length.
const MAX_POINTER_LENGTH: usize = 1024;

/// Maximum allowed path depth.
pub const MAX_PATH_LENGTH: usize = 256;

/// Validate a JSON Pointer string.
///
/// ```
/// use jsonc_edit_path::validate_pointer;
///
/// validate_pointer("").unwrap();
/// validate_pointer("/foo/bar").unwrap();
/// validate_pointer("foo").unwrap_err();
/// ```
pub fn validate_pointer(pointer: &str) -> Result<(), PathError> {
    if pointer.is_empty() {
        return Ok(());
    }
    if !pointer.starts_with('/') {
        return Err(PathError::PointerInvalid);
    }
    if pointer.len() > MAX_POINTER_LENGTH {
        return Err(PathError::PointerTooLong);
    }
    Ok(())
}

/// Validate a path before it is used to address a document.
pub fn validate_path(path: &[PathStep]) -> Result<(), PathError> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(PathError::PathTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pointers() {
        assert!(validate_pointer("/").is_ok());
        assert_eq!(validate_pointer("foo/bar"), Err(PathError::PointerInvalid));
        let long_pointer = "/".to_string() + &"a".repeat(2000);
        assert_eq!(validate_pointer(&long_pointer), Err(PathError::PointerTooLong));
    }

    #[test]
    fn test_validate_path_length() {
        let ok: Vec<PathStep> = (0..MAX_PATH_LENGTH).map(PathStep::Index).collect();
        assert!(validate_path(&ok).is_ok());
        let long: Vec<PathStep> = (0..MAX_PATH_LENGTH + 1).map(PathStep::Index).collect();
        assert_eq!(validate_path(&long), Err(PathError::PathTooLong));
    }
}
