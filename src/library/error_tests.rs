//! Unit tests for library error types

#[cfg(test)]
mod tests {
    use crate::library::error::LibraryError;
    use std::error::Error;

    #[test]
    fn test_not_found_error() {
        let error = LibraryError::NotFound("album 'trips'".to_string());
        assert_eq!(error.to_string(), "Not found: album 'trips'");
    }

    #[test]
    fn test_invalid_input_error() {
        let error = LibraryError::InvalidInput("album name is empty".to_string());
        assert_eq!(error.to_string(), "Invalid input: album name is empty");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_corrupt_key_names_tree() {
        let error = LibraryError::CorruptKey("favorites");
        assert!(error.to_string().contains("favorites"));
    }

    #[test]
    fn test_error_debug() {
        let error = LibraryError::InvalidInput("page 0".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidInput"));
        assert!(debug.contains("page 0"));
    }
}
