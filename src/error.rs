use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Io(std::io::Error),
    Walk(String),
    PathError,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Io(err) => write!(f, "{}", err),
            AppError::Walk(reason) => write!(f, "{}", reason),
            AppError::PathError => write!(f, "invalid path"),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> AppError {
        AppError::Io(err)
    }
}

impl From<std::path::StripPrefixError> for AppError {
    fn from(_err: std::path::StripPrefixError) -> AppError {
        AppError::PathError
    }
}

impl From<globwalk::GlobError> for AppError {
    fn from(err: globwalk::GlobError) -> AppError {
        AppError::Walk(err.to_string())
    }
}

impl From<globwalk::WalkError> for AppError {
    fn from(err: globwalk::WalkError) -> AppError {
        AppError::Walk(err.to_string())
    }
}
