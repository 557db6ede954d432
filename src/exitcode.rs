//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination, also used when no mode was recognized
pub const OK: i32 = 0;

/// Data format error (malformed input, bad back-reference)
pub const DATAERR: i32 = 65;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
