use sv_mem::ArrayError;

#[derive(Debug)]
pub enum LogError {
    ArrayError(ArrayError),
    IoError(std::io::Error),
    UnknownFormat {
        index: usize,
    },
    NoDefaultFormat,
    NotInitialized,
}

impl core::fmt::Display for LogError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ArrayError(_) => write!(f, "array error"),
            Self::IoError(_) => write!(f, "IO error"),
            Self::UnknownFormat { index } => write!(f, "no custom format at index {}", index),
            Self::NoDefaultFormat => write!(f, "level has no default format"),
            Self::NotInitialized => write!(f, "logger not initialized"),
        }
    }
}

impl core::error::Error for LogError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::ArrayError(err) => Some(err),
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArrayError> for LogError {

    fn from(value: ArrayError) -> Self {
        Self::ArrayError(value)
    }
}

impl From<std::io::Error> for LogError {

    fn from(value: std::io::Error) -> Self {
        Self::IoError(value)
    }
}
