use bson::{Bson, Document};
use tracing::{debug, warn};

use crate::config::UnrecognizedMetadataPolicy;
use crate::metadata::error::{MetadataError, MetadataResult};
use crate::metadata::keys::{
    GLE_STATS_KEY, IMPERSONATED_ROLES_KEY, IMPERSONATED_USERS_KEY, LEGACY_GLE_STATS_FIELD,
    LEGACY_IMPERSONATED_ROLES_FIELD, LEGACY_IMPERSONATED_USERS_FIELD, LEGACY_MAX_TIME_MS_FIELD,
    LEGACY_READ_PREFERENCE_FIELD, MAX_TIME_MS_KEY, READ_PREFERENCE_KEY,
};

/// Checks that a value found under `field` has the shape its slot requires.
pub type FieldValidator = fn(field: &str, value: &Bson) -> MetadataResult<()>;

/// A metadata value that lives at `legacy_field` in the legacy format and at
/// `metadata_key` in a metadata document.
#[derive(Clone, Copy)]
pub struct FieldRelocation {
    pub legacy_field: &'static str,
    pub metadata_key: &'static str,
    pub validate: FieldValidator,
}

impl FieldRelocation {
    pub fn upconvert(
        &self,
        legacy: &mut Document,
        metadata: &mut Document,
    ) -> MetadataResult<bool> {
        relocate_field(
            legacy,
            self.legacy_field,
            metadata,
            self.metadata_key,
            self.validate,
        )
    }

    pub fn downconvert(
        &self,
        metadata: &mut Document,
        legacy: &mut Document,
    ) -> MetadataResult<bool> {
        relocate_field(
            metadata,
            self.metadata_key,
            legacy,
            self.legacy_field,
            self.validate,
        )
    }
}

/// Order matters: downconversion appends legacy fields in this order.
pub const REQUEST_FIELD_RELOCATIONS: [FieldRelocation; 4] = [
    FieldRelocation {
        legacy_field: LEGACY_READ_PREFERENCE_FIELD,
        metadata_key: READ_PREFERENCE_KEY,
        validate: validate_document,
    },
    FieldRelocation {
        legacy_field: LEGACY_IMPERSONATED_USERS_FIELD,
        metadata_key: IMPERSONATED_USERS_KEY,
        validate: validate_document_array,
    },
    FieldRelocation {
        legacy_field: LEGACY_IMPERSONATED_ROLES_FIELD,
        metadata_key: IMPERSONATED_ROLES_KEY,
        validate: validate_document_array,
    },
    FieldRelocation {
        legacy_field: LEGACY_MAX_TIME_MS_FIELD,
        metadata_key: MAX_TIME_MS_KEY,
        validate: validate_max_time_ms,
    },
];

pub const REPLY_FIELD_RELOCATIONS: [FieldRelocation; 1] = [FieldRelocation {
    legacy_field: LEGACY_GLE_STATS_FIELD,
    metadata_key: GLE_STATS_KEY,
    validate: validate_document,
}];

/// Moves `source[from]` to `target[to]`, replacing whatever `target` held there.
/// Returns whether anything moved. Nothing is touched when validation fails.
pub fn relocate_field(
    source: &mut Document,
    from: &str,
    target: &mut Document,
    to: &str,
    validate: FieldValidator,
) -> MetadataResult<bool> {
    match source.get(from) {
        None => return Ok(false),
        Some(value) => validate(from, value)?,
    }
    match source.remove(from) {
        None => Ok(false),
        Some(value) => {
            // Remove first so the relocated field always lands at the end.
            target.remove(to);
            target.insert(to, value);
            debug!(from, to, "relocated metadata field");
            Ok(true)
        }
    }
}

/// Applies `policy` to metadata keys left over after every field in `relocations`
/// has been moved into `legacy`. A leftover key never lands in one of the
/// legacy slots of `relocations`.
pub fn carry_unrecognized_fields(
    remaining: &Document,
    legacy: &mut Document,
    relocations: &[FieldRelocation],
    policy: UnrecognizedMetadataPolicy,
) -> MetadataResult<()> {
    for (key, value) in remaining.iter() {
        match policy {
            UnrecognizedMetadataPolicy::Passthrough => {
                let reserved = relocations
                    .iter()
                    .any(|relocation| relocation.legacy_field == key.as_str());
                if reserved || legacy.contains_key(key) {
                    return Err(MetadataError::UnrepresentableField(key.clone()));
                }
                legacy.insert(key.clone(), value.clone());
            }
            UnrecognizedMetadataPolicy::Reject => {
                return Err(MetadataError::UnrepresentableField(key.clone()));
            }
            UnrecognizedMetadataPolicy::Drop => {
                warn!(field = %key, "dropping metadata field with no legacy slot");
            }
        }
    }
    Ok(())
}

pub fn bson_type_name(value: &Bson) -> &'static str {
    match value {
        Bson::FloatingPoint(_) => "double",
        Bson::String(_) => "string",
        Bson::Array(_) => "array",
        Bson::Document(_) => "object",
        Bson::Boolean(_) => "bool",
        Bson::Null => "null",
        Bson::I32(_) => "int",
        Bson::I64(_) => "long",
        Bson::TimeStamp(_) => "timestamp",
        Bson::Binary(_, _) => "binData",
        Bson::ObjectId(_) => "objectId",
        Bson::UtcDatetime(_) => "date",
        Bson::RegExp(_, _) => "regex",
        Bson::JavaScriptCode(_) | Bson::JavaScriptCodeWithScope(_, _) => "javascript",
        Bson::Symbol(_) => "symbol",
        #[allow(unreachable_patterns)]
        _ => "unknown",
    }
}

fn unexpected_type(field: &str, expected: &'static str, value: &Bson) -> MetadataError {
    MetadataError::UnexpectedType {
        field: field.to_string(),
        expected,
        found: bson_type_name(value),
    }
}

pub fn validate_document(field: &str, value: &Bson) -> MetadataResult<()> {
    match value {
        Bson::Document(_) => Ok(()),
        _ => Err(unexpected_type(field, "object", value)),
    }
}

pub fn validate_boolean(field: &str, value: &Bson) -> MetadataResult<()> {
    match value {
        Bson::Boolean(_) => Ok(()),
        _ => Err(unexpected_type(field, "bool", value)),
    }
}

/// Impersonation lists are arrays of `{user, db}` or `{role, db}` documents.
pub fn validate_document_array(field: &str, value: &Bson) -> MetadataResult<()> {
    match value {
        Bson::Array(elements) => {
            for element in elements {
                if let Bson::Document(_) = element {
                    continue;
                }
                return Err(unexpected_type(field, "array of objects", element));
            }
            Ok(())
        }
        _ => Err(unexpected_type(field, "array", value)),
    }
}

pub fn validate_max_time_ms(field: &str, value: &Bson) -> MetadataResult<()> {
    parse_max_time_ms(field, value).map(|_| ())
}

/// Time limits are non-negative 32-bit millisecond counts. Integral doubles are
/// accepted as drivers commonly send them.
pub fn parse_max_time_ms(field: &str, value: &Bson) -> MetadataResult<i64> {
    let millis = match value {
        Bson::I32(millis) => *millis as i64,
        Bson::I64(millis) => *millis,
        Bson::FloatingPoint(millis) => {
            if !millis.is_finite() || millis.fract() != 0.0 {
                return Err(MetadataError::NonIntegral {
                    field: field.to_string(),
                    value: *millis,
                });
            }
            *millis as i64
        }
        _ => return Err(unexpected_type(field, "integer", value)),
    };
    if millis < 0 || millis > std::i32::MAX as i64 {
        return Err(MetadataError::OutOfRange {
            field: field.to_string(),
            value: millis,
        });
    }
    Ok(millis)
}
