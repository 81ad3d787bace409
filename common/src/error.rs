//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Vote error: session already complete")]
    SessionComplete,

    #[error("Vote error: '{0}' is not in the current group")]
    NotInGroup(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_network() {
        let error = Error::Network("timeout".to_string());
        assert_eq!(format!("{}", error), "Network error: timeout");
    }

    #[test]
    fn test_error_display_not_in_group() {
        let error = Error::NotInGroup("abc123".to_string());
        let display = format!("{}", error);
        assert!(display.contains("abc123"));
        assert!(display.contains("not in the current group"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_display_api() {
        let error = Error::Api("submit status: pending".to_string());
        assert_eq!(format!("{}", error), "API error: submit status: pending");
    }
}
