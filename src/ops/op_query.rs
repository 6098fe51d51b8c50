use bson::Document;

use crate::metadata::query_flags::QueryFlags;
use crate::ops::error::{WireParserError, WireSerializeError};
use crate::ops::msg_header::{frame_message, MsgHeader};
use crate::ops::utils::{
    parse_bson_document, parse_cstring, parse_u32, serialize_bson_document, serialize_cstring,
    serialize_u32,
};

/// @see https://docs.mongodb.com/manual/reference/mongodb-wire-protocol/#op-query
#[derive(Debug, Clone, PartialEq)]
pub struct OpQuery {
    // standard message header
    pub message_header: MsgHeader,

    // bit vector of query options.
    pub flags: u32,

    // "dbname.collectionname"
    pub full_collection_name: String,

    // number of documents to skip
    pub number_to_skip: u32,

    // number of documents to return in the first OP_REPLY batch
    pub number_to_return: u32,

    // query object; for commands, the legacy command object
    pub query: Document,

    // Optional. Selector indicating the fields to return.
    pub return_fields_selector: Option<Document>,
}

impl OpQuery {
    pub fn query_flags(&self) -> QueryFlags {
        QueryFlags::from_bits(self.flags)
    }
}

pub fn parse_op_query(
    message_header: MsgHeader,
    buffer: &[u8],
) -> Result<OpQuery, WireParserError> {
    let (flags, next_buffer) = parse_u32(buffer)?;
    let (full_collection_name, next_buffer) = parse_cstring(next_buffer)?;
    let (number_to_skip, next_buffer) = parse_u32(next_buffer)?;
    let (number_to_return, next_buffer) = parse_u32(next_buffer)?;
    let (query, next_buffer) = parse_bson_document(next_buffer)?;
    let return_fields_selector = if next_buffer.is_empty() {
        None
    } else {
        let (selector, rest) = parse_bson_document(next_buffer)?;
        if !rest.is_empty() {
            return Err(WireParserError::TrailingBytes(rest.len()));
        }
        Some(selector)
    };
    Ok(OpQuery {
        message_header,
        flags,
        full_collection_name,
        number_to_skip,
        number_to_return,
        query,
        return_fields_selector,
    })
}

pub fn serialize_op_query(op_query: &OpQuery) -> Result<Vec<u8>, WireSerializeError> {
    let mut body = vec![];
    serialize_u32(&mut body, op_query.flags);
    serialize_cstring(&mut body, &op_query.full_collection_name)?;
    serialize_u32(&mut body, op_query.number_to_skip);
    serialize_u32(&mut body, op_query.number_to_return);
    serialize_bson_document(&mut body, &op_query.query)?;
    if let Some(selector) = &op_query.return_fields_selector {
        serialize_bson_document(&mut body, selector)?;
    }
    frame_message(&op_query.message_header, &body)
}
