use std::time::Duration;

/// The current time.
#[cfg(not(test))]
pub fn now() -> chrono::DateTime<chrono::Utc> {
    chrono::Utc::now()
}

/// During tests, the time is fixed at [`tests::NOW`].
#[cfg(test)]
pub fn now() -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::from_timestamp(tests::NOW, 0).unwrap()
}

/// Unix timestamp `valid_for` from now, as transaction deadlines expect it.
/// `None` if the clock is before the epoch.
pub fn deadline(valid_for: Duration) -> Option<u64> {
    let now = u64::try_from(now().timestamp()).ok()?;
    Some(now.saturating_add(valid_for.as_secs()))
}
