pub mod config;
pub mod exercise;
pub mod log;
pub mod meal;
pub mod profile;
pub mod summary;

use chrono::{DateTime, FixedOffset, Local};

/// Timestamp for "now" in the machine's local offset.
pub fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}
