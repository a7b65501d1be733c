/*
 * Error type shared by the outer window surface (class registration, window
 * creation, title and visibility changes, configuration validation).
 *
 * The chrome logic itself never produces errors: OS query failures during
 * frame, hit-test and activation handling degrade to safe defaults instead.
 */
use std::fmt;

#[derive(Debug)]
pub enum PlatformError {
    InitializationFailed(String),
    OperationFailed(String),
    InvalidHandle(String),
    InvalidConfiguration(String),
    #[cfg(target_os = "windows")]
    Win32(windows::core::Error),
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::InitializationFailed(msg) => write!(f, "initialization failed: {msg}"),
            PlatformError::OperationFailed(msg) => write!(f, "operation failed: {msg}"),
            PlatformError::InvalidHandle(msg) => write!(f, "invalid handle: {msg}"),
            PlatformError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            #[cfg(target_os = "windows")]
            PlatformError::Win32(err) => write!(f, "Win32 error: {err}"),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(target_os = "windows")]
            PlatformError::Win32(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(target_os = "windows")]
impl From<windows::core::Error> for PlatformError {
    fn from(err: windows::core::Error) -> Self {
        PlatformError::Win32(err)
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_variant_context() {
        let err = PlatformError::InvalidConfiguration("width must be positive".into());
        assert_eq!(
            err.to_string(),
            "invalid configuration: width must be positive"
        );
    }

    #[test]
    fn portable_variants_have_no_source() {
        let err = PlatformError::OperationFailed("x".into());
        assert!(std::error::Error::source(&err).is_none());
    }
}
