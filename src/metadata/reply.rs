use bson::Document;

use crate::config::MetadataConfiguration;
use crate::metadata::error::MetadataResult;
use crate::metadata::make_empty_metadata;
use crate::metadata::relocation::{carry_unrecognized_fields, REPLY_FIELD_RELOCATIONS};

/// A command reply and its metadata object.
pub type CommandReplyWithMetadata = (Document, Document);

/// Strips `$gleStats` out of a legacy command reply into a fresh metadata object.
pub fn upconvert_reply_metadata(
    legacy_reply: Document,
) -> MetadataResult<CommandReplyWithMetadata> {
    let mut reply = legacy_reply;
    let mut metadata = make_empty_metadata();
    for relocation in REPLY_FIELD_RELOCATIONS.iter() {
        relocation.upconvert(&mut reply, &mut metadata)?;
    }
    Ok((reply, metadata))
}

pub fn downconvert_reply_metadata(
    command_reply: Document,
    reply_metadata: Document,
) -> MetadataResult<Document> {
    downconvert_reply_metadata_with(
        command_reply,
        reply_metadata,
        &MetadataConfiguration::default(),
    )
}

/// Builds a legacy reply from a command reply and its metadata. Replies carry no
/// flags; unrecognized metadata keys follow the configured policy.
pub fn downconvert_reply_metadata_with(
    command_reply: Document,
    reply_metadata: Document,
    config: &MetadataConfiguration,
) -> MetadataResult<Document> {
    let mut legacy_reply = command_reply;
    let mut remaining = reply_metadata;
    for relocation in REPLY_FIELD_RELOCATIONS.iter() {
        relocation.downconvert(&mut remaining, &mut legacy_reply)?;
    }
    carry_unrecognized_fields(
        &remaining,
        &mut legacy_reply,
        &REPLY_FIELD_RELOCATIONS,
        config.unrecognized_metadata_policy,
    )?;
    Ok(legacy_reply)
}
