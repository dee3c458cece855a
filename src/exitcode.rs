//! Standard exit codes (BSD sysexits.h compatible)

/// Configuration error
pub const CONFIG: i32 = 78;
