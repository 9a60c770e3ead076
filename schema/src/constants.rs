// ============================================================================
// RESOLUTION CONSTANTS
// ============================================================================

/// Maximum nesting depth of record field sets before expansion is truncated
pub const MAX_NESTING_DEPTH: usize = 32;

/// Number of cache inserts between sweeps of entries whose field set was dropped
pub const CACHE_SWEEP_INTERVAL: usize = 64;

/// Maximum number of alias hops the generic-aware classifier follows
pub const MAX_ALIAS_HOPS: usize = 16;

// ============================================================================
// TYPE NAME CONSTANTS
// ============================================================================

/// The record type name
pub const TYPE_PROPERTY_BOX: &str = "PropertyBox";

// Containers built by the declared type helpers
pub const TYPE_VEC: &str = "Vec";
pub const TYPE_HASH_SET: &str = "HashSet";
pub const TYPE_BTREE_SET: &str = "BTreeSet";
pub const TYPE_HASH_MAP: &str = "HashMap";
pub const TYPE_BTREE_MAP: &str = "BTreeMap";
pub const TYPE_OPTION: &str = "Option";

pub const TYPE_STRING: &str = "String";

// ============================================================================
// SCHEMA FORMAT CONSTANTS
// ============================================================================

pub const FORMAT_INT32: &str = "int32";
pub const FORMAT_INT64: &str = "int64";
pub const FORMAT_FLOAT: &str = "float";
pub const FORMAT_DOUBLE: &str = "double";
pub const FORMAT_UUID: &str = "uuid";
pub const FORMAT_BYTE: &str = "byte";
pub const FORMAT_TIME: &str = "time";

/// Format marker set by the email validation rule
pub const FORMAT_EMAIL: &str = "email";
