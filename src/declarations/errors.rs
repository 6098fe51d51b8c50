use std::fmt;

use crate::config::ConfigError;
use crate::metadata::error::MetadataError;
use crate::ops::error::{TransformError, WireParserError, WireSerializeError};

#[derive(Debug)]
pub enum RpcError {
    Config(ConfigError),

    Metadata(MetadataError),

    WireParser(WireParserError),
    WireSerializer(WireSerializeError),
    Transform(TransformError),
}

impl std::convert::From<ConfigError> for RpcError {
    fn from(error: ConfigError) -> RpcError {
        RpcError::Config(error)
    }
}

impl std::convert::From<MetadataError> for RpcError {
    fn from(error: MetadataError) -> RpcError {
        RpcError::Metadata(error)
    }
}

impl std::convert::From<WireParserError> for RpcError {
    fn from(error: WireParserError) -> RpcError {
        RpcError::WireParser(error)
    }
}

impl std::convert::From<WireSerializeError> for RpcError {
    fn from(error: WireSerializeError) -> RpcError {
        RpcError::WireSerializer(error)
    }
}

impl std::convert::From<TransformError> for RpcError {
    fn from(error: TransformError) -> RpcError {
        RpcError::Transform(error)
    }
}

pub fn explain_error(error: &RpcError) -> &'static str {
    match error {
        RpcError::Config(_) => "configuration error",
        RpcError::Metadata(_) => "metadata conversion failed",
        RpcError::WireParser(_) => "malformed wire message",
        RpcError::WireSerializer(_) => "wire message serialization failed",
        RpcError::Transform(_) => "message cannot be converted between formats",
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RpcError::Metadata(error) => write!(f, "{}: {}", explain_error(self), error),
            _ => write!(f, "{}: {:?}", explain_error(self), self),
        }
    }
}

impl std::error::Error for RpcError {}

pub type RpcResult<T> = Result<T, RpcError>;
