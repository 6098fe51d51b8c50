use std::fmt;

/// Broad classes of metadata conversion failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataErrorKind {
    /// A recognized field is present with the wrong type or an out-of-range value.
    MalformedField,
    /// A registered request writer or reply reader reported failure.
    HookFailure,
    /// A metadata key has no slot in the legacy format.
    UnrepresentableField,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetadataError {
    UnexpectedType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
    OutOfRange {
        field: String,
        value: i64,
    },
    NonIntegral {
        field: String,
        value: f64,
    },
    HookFailure(String),
    UnrepresentableField(String),
}

impl MetadataError {
    pub fn kind(&self) -> MetadataErrorKind {
        match self {
            MetadataError::UnexpectedType { .. }
            | MetadataError::OutOfRange { .. }
            | MetadataError::NonIntegral { .. } => MetadataErrorKind::MalformedField,
            MetadataError::HookFailure(_) => MetadataErrorKind::HookFailure,
            MetadataError::UnrepresentableField(_) => MetadataErrorKind::UnrepresentableField,
        }
    }

    pub fn hook_failure(message: impl Into<String>) -> MetadataError {
        MetadataError::HookFailure(message.into())
    }
}

impl fmt::Display for MetadataError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetadataError::UnexpectedType {
                field,
                expected,
                found,
            } => write!(f, "{} must be of type {}, found {}", field, expected, found),
            MetadataError::OutOfRange { field, value } => {
                write!(f, "{} is out of range: {}", field, value)
            }
            MetadataError::NonIntegral { field, value } => {
                write!(f, "{} must be an integer, found {}", field, value)
            }
            MetadataError::HookFailure(message) => write!(f, "metadata hook failed: {}", message),
            MetadataError::UnrepresentableField(field) => write!(
                f,
                "metadata field {} cannot be represented in the legacy format",
                field
            ),
        }
    }
}

impl std::error::Error for MetadataError {}

pub type MetadataResult<T> = Result<T, MetadataError>;
