use bson::Document;

use crate::ops::error::{WireParserError, WireSerializeError};
use crate::ops::msg_header::{frame_message, MsgHeader};
use crate::ops::utils::{parse_bson_document, parse_bson_documents, serialize_bson_document};

/// @see https://docs.mongodb.com/manual/reference/mongodb-wire-protocol/#wire-op-commandreply
#[derive(Debug, Clone, PartialEq)]
pub struct OpCommandReply {
    // A standard wire protocol header
    pub header: MsgHeader,

    // A BSON document containing any required metadata
    pub metadata: Document,

    // A BSON document containing the command reply
    pub command_reply: Document,

    // A variable number of BSON documents
    pub output_docs: Vec<Document>,
}

pub fn parse_op_command_reply(
    header: MsgHeader,
    buffer: &[u8],
) -> Result<OpCommandReply, WireParserError> {
    let (metadata, next_buffer) = parse_bson_document(buffer)?;
    let (command_reply, next_buffer) = parse_bson_document(next_buffer)?;
    let output_docs = parse_bson_documents(next_buffer)?;
    Ok(OpCommandReply {
        header,
        metadata,
        command_reply,
        output_docs,
    })
}

pub fn serialize_op_command_reply(
    op_command_reply: &OpCommandReply,
) -> Result<Vec<u8>, WireSerializeError> {
    let mut body = vec![];
    serialize_bson_document(&mut body, &op_command_reply.metadata)?;
    serialize_bson_document(&mut body, &op_command_reply.command_reply)?;
    for document in &op_command_reply.output_docs {
        serialize_bson_document(&mut body, document)?;
    }
    frame_message(&op_command_reply.header, &body)
}
