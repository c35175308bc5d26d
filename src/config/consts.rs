// src/config/consts.rs

// Net config
pub const SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vQ4olJtqgvwwDUrGKVKagYtlnsBjMkFJUJvNpxc4jeKwhPX-k9Wh84S4onRYjJ3mQXoYzur_J6i1qBe/pub?output=csv";
pub const CACHE_BUST_PARAM: &str = "t";
pub const USER_AGENT: &str = concat!("rollcall/", env!("CARGO_PKG_VERSION"));
pub const AVATAR_URL: &str = "https://ui-avatars.com/api/";

// Polling
pub const POLL_INTERVAL_MS: u64 = 3_000;
pub const REFRESH_ANIM_MS: u64 = 1_000;
/// Hung requests beyond this many stop new fetches from starting.
pub const MAX_IN_FLIGHT: usize = 8;

// Notifications
pub const NOTIFY_TTL_MS: u64 = 5_000;
pub const NOTIFY_FADE_MS: u64 = 300;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const CACHE_KEY: &str = "attendanceData";
pub const LOG_FILE: &str = "rollcall.log";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const EXPORT_HEADER: &str = "UID,Name,Contact,Attendance";
pub const EXPORT_PREFIX: &str = "attendance_";
