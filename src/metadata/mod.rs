//! Conversion of command metadata between the legacy OP_QUERY format and the
//! OP_COMMAND format.
//!
//! Request/Reply | legacy (OP_QUERY) location           | OP_COMMAND metadata key
//! --------------|--------------------------------------|------------------------
//! Request       | slaveOk bit of the query flags       | `$secondaryOk`
//! Request       | `$readPreference` on the command     | `$readPreference`
//! Request       | `$impersonatedUsers` on the command  | `$impersonatedUsers`
//! Request       | `$impersonatedRoles` on the command  | `$impersonatedRoles`
//! Request       | `maxTimeMS` on the command           | `$maxTimeMS`
//! Reply         | `$gleStats` on the command reply     | `$gleStats`

use bson::Document;

pub mod context;
pub mod error;
pub mod hooks;
pub mod keys;
pub mod pipeline;
pub mod query_flags;
pub mod relocation;
pub mod reply;
pub mod request;

/// Returns a new, empty metadata object.
pub fn make_empty_metadata() -> Document {
    Document::new()
}
