//! Retry with exponential backoff
//!
//! For transient failures talking to the backing store: wait, double, try
//! again, and give up with the last error once attempts run out.

use std::time::Duration;

use log::warn;

/// Run `op` up to `attempts` times, doubling the delay between tries
///
/// The delay is applied after a failure, so a first-try success pays nothing.
/// `attempts` of zero is treated as one.
pub fn retry_with_backoff<T, E, F>(
    attempts: u32,
    initial_delay: Duration,
    mut op: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Result<T, E>,
{
    let attempts = attempts.max(1);
    let mut delay = initial_delay;
    let mut last_err = None;

    for attempt in 1..=attempts {
        match op() {
            Ok(value) => return Ok(value),
            Err(e) => {
                warn!("attempt {}/{} failed: {}", attempt, attempts, e);
                last_err = Some(e);
                if attempt < attempts {
                    std::thread::sleep(delay);
                    delay *= 2;
                }
            }
        }
    }

    // attempts >= 1 guarantees at least one op() ran
    Err(last_err.expect("at least one attempt"))
}
