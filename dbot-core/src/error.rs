use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Member directory error: {0}")]
    Directory(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DbotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts_into_dbot_error() {
        let err: DbotError = std::io::Error::new(std::io::ErrorKind::NotFound, "session").into();
        assert!(matches!(err, DbotError::Io(_)));
        assert_eq!(err.to_string(), "IO error: session");
    }

    #[test]
    fn test_timeout_display() {
        let err = DbotError::Timeout("member list for chat -100".to_string());
        assert_eq!(err.to_string(), "Timed out: member list for chat -100");
    }
}
