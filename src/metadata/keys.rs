// Metadata document keys. The spellings are shared with every peer speaking the
// legacy format and must not change.
pub const SECONDARY_OK_KEY: &str = "$secondaryOk";
pub const READ_PREFERENCE_KEY: &str = "$readPreference";
pub const IMPERSONATED_USERS_KEY: &str = "$impersonatedUsers";
pub const IMPERSONATED_ROLES_KEY: &str = "$impersonatedRoles";
pub const MAX_TIME_MS_KEY: &str = "$maxTimeMS";
pub const GLE_STATS_KEY: &str = "$gleStats";

// Where the same values live inside a legacy command or reply.
pub const LEGACY_READ_PREFERENCE_FIELD: &str = "$readPreference";
pub const LEGACY_IMPERSONATED_USERS_FIELD: &str = "$impersonatedUsers";
pub const LEGACY_IMPERSONATED_ROLES_FIELD: &str = "$impersonatedRoles";
pub const LEGACY_MAX_TIME_MS_FIELD: &str = "maxTimeMS";
pub const LEGACY_GLE_STATS_FIELD: &str = "$gleStats";
