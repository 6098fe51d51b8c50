use crate::ops::error::{WireParserError, WireSerializeError};
use crate::ops::msg_header::parse_msg_header;
use crate::ops::op_command::{parse_op_command, serialize_op_command, OpCommand};
use crate::ops::op_command_reply::{
    parse_op_command_reply, serialize_op_command_reply, OpCommandReply,
};
use crate::ops::op_query::{parse_op_query, serialize_op_query, OpQuery};
use crate::ops::op_reply::{parse_op_reply, serialize_op_reply, OpReply};
use crate::ops::opcodes::MongoOpCode;

/// The messages that carry commands, in either metadata format.
#[derive(Debug, Clone, PartialEq)]
pub enum MongoOp {
    Query(OpQuery),
    Reply(OpReply),
    Command(OpCommand),
    CommandReply(OpCommandReply),
}

pub fn parse_mongo_message(buffer: &[u8]) -> Result<MongoOp, WireParserError> {
    let (header, body) = parse_msg_header(buffer)?;
    if header.message_length as usize != buffer.len() {
        return Err(WireParserError::MessageLengthMismatch {
            declared: header.message_length,
            actual: buffer.len(),
        });
    }
    let op_code = header.op_code;
    match op_code {
        MongoOpCode::OpQuery => Ok(MongoOp::Query(parse_op_query(header, body)?)),
        MongoOpCode::OpReply => Ok(MongoOp::Reply(parse_op_reply(header, body)?)),
        MongoOpCode::OpCommand => Ok(MongoOp::Command(parse_op_command(header, body)?)),
        MongoOpCode::OpCommandReply => Ok(MongoOp::CommandReply(parse_op_command_reply(
            header, body,
        )?)),
        op_code => Err(WireParserError::UnexpectedOpCode(op_code)),
    }
}

pub fn serialize_mongo_message(op: &MongoOp) -> Result<Vec<u8>, WireSerializeError> {
    match op {
        MongoOp::Query(op_query) => serialize_op_query(op_query),
        MongoOp::Reply(op_reply) => serialize_op_reply(op_reply),
        MongoOp::Command(op_command) => serialize_op_command(op_command),
        MongoOp::CommandReply(op_command_reply) => serialize_op_command_reply(op_command_reply),
    }
}
