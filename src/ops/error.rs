use std::fmt;

use crate::ops::opcodes::MongoOpCode;

#[derive(Debug)]
pub enum WireParserError {
    NotEnoughBufferSize,
    NoZeroTrailingInCstringBuffer,
    CstringNotUtf8,
    InvalidDocumentLength(u32),
    ParseBsonError(bson::DecoderError),
    UnknownOpCode(u32),
    UnexpectedOpCode(MongoOpCode),
    MessageLengthMismatch { declared: u32, actual: usize },
    TrailingBytes(usize),
}

#[derive(Debug)]
pub enum WireSerializeError {
    CstringContainZeroByte(String),
    SerializeBsonError(bson::EncoderError),
    MessageTooLarge(usize),
}

/// Failures moving a message between its OP_QUERY/OP_REPLY and
/// OP_COMMAND/OP_COMMANDREPLY forms.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    NotACommandNamespace(String),
    EmptyCommand,
    CommandNameMismatch { declared: String, actual: String },
    UnexpectedReplyDocumentCount(usize),
    UnrepresentableInputDocs(usize),
    UnrepresentableOutputDocs(usize),
}

impl fmt::Display for WireParserError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot parse wire message: {:?}", self)
    }
}

impl fmt::Display for WireSerializeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot serialize wire message: {:?}", self)
    }
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "cannot convert message: {:?}", self)
    }
}

impl std::error::Error for WireParserError {}

impl std::error::Error for WireSerializeError {}

impl std::error::Error for TransformError {}
