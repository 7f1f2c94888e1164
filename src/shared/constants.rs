/// Value of the `status` field in every success envelope
pub const STATUS_SUCCESS: &str = "success";

// =============================================================================
// IDENTIFIERS
// =============================================================================

pub const ADMIN_ID_PREFIX: &str = "a-";
pub const ADMIN_ID_SIZE: usize = 3;

pub const GROUP_ID_PREFIX: &str = "g-";
pub const GROUP_ID_SIZE: usize = 3;

pub const PROPERTY_ID_PREFIX: &str = "p-";
pub const PROPERTY_ID_SIZE: usize = 7;

pub const SHOW_SCHEDULE_ID_PREFIX: &str = "s-";
pub const SHOW_SCHEDULE_ID_SIZE: usize = 7;

// =============================================================================
// QR CODES
// =============================================================================

/// Edge length in pixels of generated QR images
pub const QR_CODE_SIZE: u32 = 2048;

pub const CONTENT_TYPE_PNG: &str = "image/png";
