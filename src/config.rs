//! Shared configuration constants.
//!
//! The codec and the registry must agree on these values, so they live in
//! one place instead of being redeclared at each use site.

/// Field delimiter used in backing files.
pub const FIELD_DELIMITER: char = ',';

/// Quote character for values that embed the delimiter, a quote, or a line
/// break.
pub const QUOTE: char = '"';

/// Extension of backing files created through
/// [`Registry::create_table`](crate::Registry::create_table).
pub const TABLE_FILE_EXT: &str = "csv";

/// Name of the field used for id-range filtering and join lookups.
pub const ID_FIELD: &str = "id";
