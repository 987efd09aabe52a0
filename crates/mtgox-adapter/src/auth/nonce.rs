/*
[INPUT]:  Wall clock (microsecond UNIX time)
[OUTPUT]: Strictly increasing nonces per signing context
[POS]:    Auth layer - replay protection for signed requests
[UPDATE]: When changing nonce resolution or clock source
*/

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Current UNIX time in microseconds
pub fn unix_micros() -> u64 {
    u64::try_from(Utc::now().timestamp_micros()).unwrap_or(0)
}

/// Issues strictly increasing nonces
///
/// Each value is `max(clock(), last + 1)`, computed in a single atomic
/// update, so concurrent callers never see duplicates even when the clock
/// stalls or steps backwards.
#[derive(Debug)]
pub struct NonceGenerator {
    last: AtomicU64,
    clock: fn() -> u64,
}

impl NonceGenerator {
    /// Generator backed by microsecond wall-clock time
    pub fn new() -> Self {
        Self::with_clock(unix_micros)
    }

    /// Generator backed by a custom clock
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self {
            last: AtomicU64::new(0),
            clock,
        }
    }

    /// Issue the next nonce
    pub fn next(&self) -> u64 {
        let now = (self.clock)();
        let previous = match self.last.fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
            Some(now.max(last.saturating_add(1)))
        }) {
            Ok(previous) | Err(previous) => previous,
        };
        now.max(previous.saturating_add(1))
    }

    /// Most recently issued nonce (0 before the first call)
    pub fn last(&self) -> u64 {
        self.last.load(Ordering::Acquire)
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
