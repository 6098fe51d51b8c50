use bson::Document;

use crate::config::MetadataConfiguration;
use crate::declarations::errors::RpcResult;
use crate::metadata::reply::{downconvert_reply_metadata_with, upconvert_reply_metadata};
use crate::metadata::request::{downconvert_request_metadata_with, upconvert_request_metadata};
use crate::ops::error::TransformError;
use crate::ops::op_command::OpCommand;
use crate::ops::op_command_reply::OpCommandReply;
use crate::ops::op_query::OpQuery;
use crate::ops::op_reply::OpReply;
use crate::ops::opcodes::MongoOpCode;

const COMMAND_COLLECTION: &str = "$cmd";

// Legacy command queries ask for a single reply document.
const COMMAND_NUMBER_TO_RETURN: u32 = 1;

/// "test.$cmd" -> "test"
pub fn command_database(full_collection_name: &str) -> Result<&str, TransformError> {
    match full_collection_name.find('.') {
        Some(index)
            if index > 0 && &full_collection_name[index + 1..] == COMMAND_COLLECTION =>
        {
            Ok(&full_collection_name[..index])
        }
        _ => Err(TransformError::NotACommandNamespace(
            full_collection_name.to_string(),
        )),
    }
}

fn command_name(command: &Document) -> Result<String, TransformError> {
    match command.keys().next() {
        None => Err(TransformError::EmptyCommand),
        Some(name) => Ok(name.to_string()),
    }
}

pub fn op_query_to_op_command(op_query: OpQuery) -> RpcResult<OpCommand> {
    let database = command_database(&op_query.full_collection_name)?.to_string();
    let (command_args, metadata) = upconvert_request_metadata(op_query.query, op_query.flags)?;
    let command_name = command_name(&command_args)?;
    Ok(OpCommand {
        header: op_query
            .message_header
            .with_op_code(MongoOpCode::OpCommand),
        database,
        command_name,
        metadata,
        command_args,
        input_docs: vec![],
    })
}

pub fn op_command_to_op_query(
    op_command: OpCommand,
    config: &MetadataConfiguration,
) -> RpcResult<OpQuery> {
    if !op_command.input_docs.is_empty() {
        return Err(TransformError::UnrepresentableInputDocs(op_command.input_docs.len()).into());
    }
    let actual_name = command_name(&op_command.command_args)?;
    if actual_name != op_command.command_name {
        return Err(TransformError::CommandNameMismatch {
            declared: op_command.command_name,
            actual: actual_name,
        }
        .into());
    }
    let (query, flags) =
        downconvert_request_metadata_with(op_command.command_args, op_command.metadata, 0, config)?;
    Ok(OpQuery {
        message_header: op_command.header.with_op_code(MongoOpCode::OpQuery),
        flags,
        full_collection_name: format!("{}.{}", op_command.database, COMMAND_COLLECTION),
        number_to_skip: 0,
        number_to_return: COMMAND_NUMBER_TO_RETURN,
        query,
        return_fields_selector: None,
    })
}

pub fn op_reply_to_op_command_reply(op_reply: OpReply) -> RpcResult<OpCommandReply> {
    let document_count = op_reply.documents.len();
    let mut documents = op_reply.documents;
    let legacy_reply = match documents.pop() {
        Some(document) if document_count == 1 => document,
        _ => return Err(TransformError::UnexpectedReplyDocumentCount(document_count).into()),
    };
    let (command_reply, metadata) = upconvert_reply_metadata(legacy_reply)?;
    Ok(OpCommandReply {
        header: op_reply
            .message_header
            .with_op_code(MongoOpCode::OpCommandReply),
        metadata,
        command_reply,
        output_docs: vec![],
    })
}

pub fn op_command_reply_to_op_reply(
    op_command_reply: OpCommandReply,
    config: &MetadataConfiguration,
) -> RpcResult<OpReply> {
    if !op_command_reply.output_docs.is_empty() {
        return Err(
            TransformError::UnrepresentableOutputDocs(op_command_reply.output_docs.len()).into(),
        );
    }
    let legacy_reply = downconvert_reply_metadata_with(
        op_command_reply.command_reply,
        op_command_reply.metadata,
        config,
    )?;
    Ok(OpReply {
        message_header: op_command_reply
            .header
            .with_op_code(MongoOpCode::OpReply),
        response_flags: 0,
        cursor_id: 0,
        starting_from: 0,
        documents: vec![legacy_reply],
    })
}
