use crate::core::error::HelpCenterError;
use crate::utils::time::current_timestamp_millis;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out strictly increasing record ids.
///
/// Ids track wall-clock milliseconds while that is ahead of the last id and
/// otherwise count up by one, so bursts within a single millisecond never
/// collide.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    /// Start above every id already in use
    pub fn starting_after(max_existing: u64) -> Self {
        Self {
            last: AtomicU64::new(max_existing),
        }
    }

    /// Fails once the id space is used up, e.g. after a stored id of `u64::MAX`
    pub fn next_id(&self) -> Result<u64, HelpCenterError> {
        let now = current_timestamp_millis().max(0) as u64;
        let mut last = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = last
                .checked_add(1)
                .ok_or_else(|| HelpCenterError::Internal("Record id space exhausted".to_string()))?
                .max(now);
            match self
                .last
                .compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return Ok(candidate),
                Err(actual) => last = actual,
            }
        }
    }

    pub fn last_id(&self) -> u64 {
        self.last.load(Ordering::Relaxed)
    }
}
