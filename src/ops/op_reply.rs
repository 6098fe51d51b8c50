use bson::Document;

use crate::ops::error::{WireParserError, WireSerializeError};
use crate::ops::msg_header::{frame_message, MsgHeader};
use crate::ops::utils::{
    parse_bson_document, parse_u32, parse_u64, serialize_bson_document, serialize_u32,
    serialize_u64,
};

/// @see https://docs.mongodb.com/manual/reference/mongodb-wire-protocol/#op-reply
#[derive(Debug, Clone, PartialEq)]
pub struct OpReply {
    // standard message header
    pub message_header: MsgHeader,

    // bit vector
    pub response_flags: u32,

    // cursor id if client needs to do get more's
    pub cursor_id: u64,

    // where in the cursor this reply is starting
    pub starting_from: u32,

    // documents; numberReturned on the wire is their count
    pub documents: Vec<Document>,
}

pub fn parse_op_reply(
    message_header: MsgHeader,
    buffer: &[u8],
) -> Result<OpReply, WireParserError> {
    let (response_flags, next_buffer) = parse_u32(buffer)?;
    let (cursor_id, next_buffer) = parse_u64(next_buffer)?;
    let (starting_from, next_buffer) = parse_u32(next_buffer)?;
    let (number_returned, mut next_buffer) = parse_u32(next_buffer)?;
    let mut documents = vec![];
    for _ in 0..number_returned {
        let (document, rest_buffer) = parse_bson_document(next_buffer)?;
        next_buffer = rest_buffer;
        documents.push(document);
    }
    if !next_buffer.is_empty() {
        return Err(WireParserError::TrailingBytes(next_buffer.len()));
    }
    Ok(OpReply {
        message_header,
        response_flags,
        cursor_id,
        starting_from,
        documents,
    })
}

pub fn serialize_op_reply(op_reply: &OpReply) -> Result<Vec<u8>, WireSerializeError> {
    let mut body = vec![];
    serialize_u32(&mut body, op_reply.response_flags);
    serialize_u64(&mut body, op_reply.cursor_id);
    serialize_u32(&mut body, op_reply.starting_from);
    serialize_u32(&mut body, op_reply.documents.len() as u32);
    for document in &op_reply.documents {
        serialize_bson_document(&mut body, document)?;
    }
    frame_message(&op_reply.message_header, &body)
}
