use std::convert::TryFrom;

use bson::{Array, Bson, Document};

use crate::metadata::error::{MetadataError, MetadataResult};
use crate::metadata::keys::{
    IMPERSONATED_ROLES_KEY, IMPERSONATED_USERS_KEY, MAX_TIME_MS_KEY, READ_PREFERENCE_KEY,
    SECONDARY_OK_KEY,
};
use crate::metadata::relocation::{
    parse_max_time_ms, validate_boolean, validate_document, validate_document_array,
};

/// Typed view of a request metadata object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestMetadata {
    pub secondary_ok: bool,
    pub read_preference: Option<Document>,
    pub impersonated_users: Option<Array>,
    pub impersonated_roles: Option<Array>,
    pub max_time_ms: Option<i64>,
}

impl RequestMetadata {
    /// Unrecognized keys are left for hooks and ignored here.
    pub fn parse(metadata: &Document) -> MetadataResult<RequestMetadata> {
        let mut parsed = RequestMetadata::default();
        for (key, value) in metadata.iter() {
            match key.as_str() {
                SECONDARY_OK_KEY => {
                    validate_boolean(key, value)?;
                    parsed.secondary_ok = value.as_bool().unwrap_or(false);
                }
                READ_PREFERENCE_KEY => {
                    validate_document(key, value)?;
                    parsed.read_preference = value.as_document().cloned();
                }
                IMPERSONATED_USERS_KEY => {
                    validate_document_array(key, value)?;
                    parsed.impersonated_users = value.as_array().cloned();
                }
                IMPERSONATED_ROLES_KEY => {
                    validate_document_array(key, value)?;
                    parsed.impersonated_roles = value.as_array().cloned();
                }
                MAX_TIME_MS_KEY => {
                    parsed.max_time_ms = Some(parse_max_time_ms(key, value)?);
                }
                _ => (),
            }
        }
        Ok(parsed)
    }

    /// Appends the fields that are set. A false `secondary_ok` is left out.
    /// A time limit outside `0..=i32::MAX` fails before anything is written.
    pub fn write_into(&self, builder: &mut Document) -> MetadataResult<()> {
        let max_time_ms = match self.max_time_ms {
            None => None,
            Some(millis) => match i32::try_from(millis) {
                Ok(millis) if millis >= 0 => Some(millis),
                _ => {
                    return Err(MetadataError::OutOfRange {
                        field: MAX_TIME_MS_KEY.to_string(),
                        value: millis,
                    })
                }
            },
        };
        if self.secondary_ok {
            builder.insert(SECONDARY_OK_KEY, true);
        }
        if let Some(read_preference) = &self.read_preference {
            builder.insert(READ_PREFERENCE_KEY, read_preference.clone());
        }
        if let Some(users) = &self.impersonated_users {
            builder.insert(IMPERSONATED_USERS_KEY, Bson::Array(users.clone()));
        }
        if let Some(roles) = &self.impersonated_roles {
            builder.insert(IMPERSONATED_ROLES_KEY, Bson::Array(roles.clone()));
        }
        if let Some(max_time_ms) = max_time_ms {
            builder.insert(MAX_TIME_MS_KEY, max_time_ms);
        }
        Ok(())
    }
}

/// Per-operation state the surrounding RPC layer keeps for a command.
pub trait OperationContext {
    fn request_metadata(&self) -> &RequestMetadata;
    fn set_request_metadata(&mut self, metadata: RequestMetadata);
}

/// Parses `metadata` and stores it on `context`. On failure `context` is untouched.
pub fn read_request_metadata<C>(context: &mut C, metadata: &Document) -> MetadataResult<()>
where
    C: OperationContext + ?Sized,
{
    let parsed = RequestMetadata::parse(metadata)?;
    context.set_request_metadata(parsed);
    Ok(())
}

/// Appends the metadata held by `context` to `builder`.
pub fn write_request_metadata<C>(context: &C, builder: &mut Document) -> MetadataResult<()>
where
    C: OperationContext + ?Sized,
{
    context.request_metadata().write_into(builder)
}
