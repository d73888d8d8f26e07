/// Error code registry
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 3000-3999: Storage errors
/// - 7000-7999: Validation errors
/// - 8000-8999: Lookup errors
#[allow(dead_code)]
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_INVALID_JSON: u16 = 1003;
    pub const CONFIG_INVALID_VALUE: u16 = 1005;
    pub const CONFIG_BIND_FAILED: u16 = 1010;

    // Storage errors (3000-3999)
    pub const STORAGE_GENERIC: u16 = 3000;
    pub const STORAGE_IO_ERROR: u16 = 3001;
    pub const STORAGE_PERMISSION_DENIED: u16 = 3002;
    pub const STORAGE_ALREADY_EXISTS: u16 = 3005;
    pub const STORAGE_BACKEND_ERROR: u16 = 3010;
    pub const STORAGE_SERIALIZATION_ERROR: u16 = 3011;
    pub const STORAGE_QUOTA_EXCEEDED: u16 = 3013;

    // Validation errors (7000-7999)
    pub const VALIDATION_GENERIC: u16 = 7000;
    pub const VALIDATION_INVALID_INPUT: u16 = 7008;

    // Lookup errors (8000-8999)
    pub const NOT_FOUND_GENERIC: u16 = 8000;
    pub const NOT_FOUND_CALCULATION: u16 = 8001;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1003 => "Invalid JSON syntax",
        1005 => "Invalid value in configuration",
        1010 => "Failed to bind server address",

        3000 => "Generic storage error",
        3001 => "Storage I/O error",
        3002 => "Storage permission denied",
        3005 => "Storage item already exists",
        3010 => "Storage backend error",
        3011 => "Storage serialization error",
        3013 => "Storage quota exceeded",

        7000 => "Generic validation error",
        7008 => "Invalid calculation input",

        8000 => "Item not found",
        8001 => "Calculation not found",

        _ => "Unknown error code",
    }
}
