use chrono::{DateTime, Utc};

/// Current wall-clock time in UTC
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}

pub fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}
