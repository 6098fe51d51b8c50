pub mod error;
pub mod msg_header;
pub mod op;
pub mod op_command;
pub mod op_command_reply;
pub mod op_query;
pub mod op_reply;
pub mod opcodes;
pub mod transformer;
pub mod utils;
