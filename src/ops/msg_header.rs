// @see https://docs.mongodb.com/manual/reference/mongodb-wire-protocol/#standard-message-header

use crate::ops::error::{WireParserError, WireSerializeError};
use crate::ops::opcodes::{pick_op_code, MongoOpCode};
use crate::ops::utils::{parse_u32, serialize_u32};

pub const MSG_HEADER_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct MsgHeader {
    // total message size, including this
    pub message_length: u32,

    // identifier for this message
    pub request_id: u32,

    // requestID from the original request (used in responses from db)
    pub response_to: u32,

    // request type
    pub op_code: MongoOpCode,
}

impl MsgHeader {
    /// Same message identity, different message type.
    pub fn with_op_code(&self, op_code: MongoOpCode) -> MsgHeader {
        MsgHeader {
            message_length: self.message_length,
            request_id: self.request_id,
            response_to: self.response_to,
            op_code,
        }
    }
}

pub fn parse_msg_header(buffer: &[u8]) -> Result<(MsgHeader, &[u8]), WireParserError> {
    let (message_length, next_buffer) = parse_u32(buffer)?;
    let (request_id, next_buffer) = parse_u32(next_buffer)?;
    let (response_to, next_buffer) = parse_u32(next_buffer)?;
    let (op_code_u32, next_buffer) = parse_u32(next_buffer)?;
    let op_code = pick_op_code(op_code_u32)?;
    Ok((
        MsgHeader {
            message_length,
            request_id,
            response_to,
            op_code,
        },
        next_buffer,
    ))
}

/// Prefixes `body` with `header`, filling in the real message length.
pub fn frame_message(header: &MsgHeader, body: &[u8]) -> Result<Vec<u8>, WireSerializeError> {
    let total_length = MSG_HEADER_SIZE + body.len();
    if total_length > std::i32::MAX as usize {
        return Err(WireSerializeError::MessageTooLarge(total_length));
    }
    let mut buffer = Vec::with_capacity(total_length);
    serialize_u32(&mut buffer, total_length as u32);
    serialize_u32(&mut buffer, header.request_id);
    serialize_u32(&mut buffer, header.response_to);
    serialize_u32(&mut buffer, header.op_code as u32);
    buffer.extend_from_slice(body);
    Ok(buffer)
}
