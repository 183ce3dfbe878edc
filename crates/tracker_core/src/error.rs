use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidTask(String),
    IndexOutOfRange(String),
    InvalidArgument(String),
    CorruptRecord(String),
    Persistence(String),
}

impl AppError {
    pub fn invalid_task<M: Into<String>>(message: M) -> Self {
        Self::InvalidTask(message.into())
    }

    pub fn index_out_of_range<M: Into<String>>(message: M) -> Self {
        Self::IndexOutOfRange(message.into())
    }

    pub fn invalid_argument<M: Into<String>>(message: M) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn corrupt_record<M: Into<String>>(message: M) -> Self {
        Self::CorruptRecord(message.into())
    }

    pub fn persistence<M: Into<String>>(message: M) -> Self {
        Self::Persistence(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTask(_) => "invalid_task",
            Self::IndexOutOfRange(_) => "index_out_of_range",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::CorruptRecord(_) => "corrupt_record",
            Self::Persistence(_) => "persistence_error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidTask(message) => message,
            Self::IndexOutOfRange(message) => message,
            Self::InvalidArgument(message) => message,
            Self::CorruptRecord(message) => message,
            Self::Persistence(message) => message,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
