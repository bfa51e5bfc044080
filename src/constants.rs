/// Number of rooms listed by the "top rooms" report
pub const TOP_ROOMS_LIMIT: i64 = 10;

/// Default number of bookings listed by the "top bookings" report
pub const DEFAULT_TOP_BOOKINGS_LIMIT: i64 = 20;

/// Upper bound accepted for `?limit=` on report queries
pub const MAX_REPORT_LIMIT: i64 = 500;

/// Seconds to wait on a locked SQLite database before failing
pub const DATABASE_BUSY_TIMEOUT_SECS: u64 = 5;

/// Byte-order mark that spreadsheet exports like to prepend to the first cell
pub const BYTE_ORDER_MARK: char = '\u{feff}';

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for an invalid user form
pub const ERR_USER_FIELDS: &str = "Name and valid Email required";

/// Error message for an invalid room form
pub const ERR_ROOM_FIELDS: &str =
    "Room name required, capacity must be a positive whole number and price a non-negative number";

/// Error message for an invalid booking form
pub const ERR_BOOKING_FIELDS: &str =
    "Check-in date required and nights must be a positive whole number";
