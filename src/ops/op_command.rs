use bson::Document;

use crate::ops::error::{WireParserError, WireSerializeError};
use crate::ops::msg_header::{frame_message, MsgHeader};
use crate::ops::utils::{
    parse_bson_document, parse_bson_documents, parse_cstring, serialize_bson_document,
    serialize_cstring,
};

/// @see https://docs.mongodb.com/manual/reference/mongodb-wire-protocol/#op-command
#[derive(Debug, Clone, PartialEq)]
pub struct OpCommand {
    // standard message header
    pub header: MsgHeader,

    // the name of the database to run the command on
    pub database: String,

    // the name of the command
    pub command_name: String,

    // a BSON document containing any metadata
    pub metadata: Document,

    // a BSON document containing the command arguments
    pub command_args: Document,

    // a set of zero or more documents
    pub input_docs: Vec<Document>,
}

pub fn parse_op_command(header: MsgHeader, buffer: &[u8]) -> Result<OpCommand, WireParserError> {
    let (database, next_buffer) = parse_cstring(buffer)?;
    let (command_name, next_buffer) = parse_cstring(next_buffer)?;
    let (metadata, next_buffer) = parse_bson_document(next_buffer)?;
    let (command_args, next_buffer) = parse_bson_document(next_buffer)?;
    let input_docs = parse_bson_documents(next_buffer)?;
    Ok(OpCommand {
        header,
        database,
        command_name,
        metadata,
        command_args,
        input_docs,
    })
}

pub fn serialize_op_command(op_command: &OpCommand) -> Result<Vec<u8>, WireSerializeError> {
    let mut body = vec![];
    serialize_cstring(&mut body, &op_command.database)?;
    serialize_cstring(&mut body, &op_command.command_name)?;
    serialize_bson_document(&mut body, &op_command.metadata)?;
    serialize_bson_document(&mut body, &op_command.command_args)?;
    for document in &op_command.input_docs {
        serialize_bson_document(&mut body, document)?;
    }
    frame_message(&op_command.header, &body)
}
