use bson::{Bson, Document};

use crate::config::MetadataConfiguration;
use crate::metadata::error::MetadataResult;
use crate::metadata::keys::SECONDARY_OK_KEY;
use crate::metadata::make_empty_metadata;
use crate::metadata::query_flags::{bit_to_metadata, metadata_to_bit};
use crate::metadata::relocation::{
    carry_unrecognized_fields, validate_boolean, REQUEST_FIELD_RELOCATIONS,
};

/// A command object and a corresponding metadata object.
pub type CommandAndMetadata = (Document, Document);

/// A legacy command object and an OP_QUERY flags bitfield. The command may still
/// carry metadata fields, so it is not safe to hand to a command's run method.
pub type LegacyCommandAndFlags = (Document, u32);

/// Pulls the metadata out of a legacy command and its query flags.
///
/// `$secondaryOk` appears in the metadata only when the slaveOk bit is set.
pub fn upconvert_request_metadata(
    legacy_cmd: Document,
    query_flags: u32,
) -> MetadataResult<CommandAndMetadata> {
    let mut command = legacy_cmd;
    let mut metadata = make_empty_metadata();

    if bit_to_metadata(query_flags) {
        metadata.insert(SECONDARY_OK_KEY, true);
    }
    for relocation in REQUEST_FIELD_RELOCATIONS.iter() {
        relocation.upconvert(&mut command, &mut metadata)?;
    }

    Ok((command, metadata))
}

/// Folds a metadata object back into a command, with the default configuration
/// and no other query flags set.
pub fn downconvert_request_metadata(
    cmd: Document,
    metadata: Document,
) -> MetadataResult<LegacyCommandAndFlags> {
    downconvert_request_metadata_with(cmd, metadata, 0, &MetadataConfiguration::default())
}

/// Folds a metadata object back into a command.
///
/// Only the slaveOk bit of `base_flags` is changed. Metadata values take precedence
/// over same-named legacy fields already present in `cmd`.
pub fn downconvert_request_metadata_with(
    cmd: Document,
    metadata: Document,
    base_flags: u32,
    config: &MetadataConfiguration,
) -> MetadataResult<LegacyCommandAndFlags> {
    let mut legacy_cmd = cmd;
    let mut remaining = metadata;

    let secondary_ok = match remaining.remove(SECONDARY_OK_KEY) {
        None => false,
        Some(Bson::Boolean(secondary_ok)) => secondary_ok,
        Some(other) => {
            validate_boolean(SECONDARY_OK_KEY, &other)?;
            false
        }
    };
    for relocation in REQUEST_FIELD_RELOCATIONS.iter() {
        relocation.downconvert(&mut remaining, &mut legacy_cmd)?;
    }
    carry_unrecognized_fields(
        &remaining,
        &mut legacy_cmd,
        &REQUEST_FIELD_RELOCATIONS,
        config.unrecognized_metadata_policy,
    )?;

    Ok((legacy_cmd, metadata_to_bit(secondary_ok, base_flags)))
}
