//! Exit code constants for the jar-archiver CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid build descriptor, bad layout configuration)
//! - 2: Manifest failure (interpolation or malformed attribute)
//! - 3: Filesystem failure (missing descriptor, unreadable or unwritable file)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid build descriptor.
pub const USER_ERROR: i32 = 1;

/// Manifest failure: unresolved or cyclic template variable, malformed attribute.
pub const MANIFEST_FAILURE: i32 = 2;

/// Filesystem failure: missing or invalid files, directory creation, read/write errors.
pub const IO_FAILURE: i32 = 3;
