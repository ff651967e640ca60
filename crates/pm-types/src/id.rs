//! Opaque identifier generation.
//!
//! Identifiers are plain strings. Nothing downstream assumes an ordering or a
//! numeric meaning; they only need to be unique for the lifetime of one
//! application instance.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};

/// Mixed into the fallback seed so two calls within one clock tick diverge.
static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Which generator [`new_id_with`] should use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdStrategy {
    /// Random UUID v4 from OS randomness, falling back to
    /// [`IdStrategy::Timestamp`] when the OS source is unavailable.
    #[default]
    Uuid,
    /// `"{epoch_ms}_{digits}"` with digits of a random fraction.
    Timestamp,
}

/// Generate a new identifier with the default strategy.
pub fn new_id() -> String {
    new_id_with(IdStrategy::default())
}

/// Generate a new identifier with an explicit strategy.
pub fn new_id_with(strategy: IdStrategy) -> String {
    match strategy {
        IdStrategy::Uuid => os_uuid().unwrap_or_else(timestamp_id),
        IdStrategy::Timestamp => timestamp_id(),
    }
}

fn os_uuid() -> Option<String> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes).ok()?;
    Some(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
}

fn timestamp_id() -> String {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    let counter = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
    let seed = (now.as_nanos() as u64) ^ counter.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let fraction: f64 = StdRng::seed_from_u64(seed).gen();
    let text = fraction.to_string();
    let digits = text.strip_prefix("0.").unwrap_or(&text);
    format!("{}_{}", now.as_millis(), digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_id_is_a_v4_uuid() {
        let id = new_id();
        let parsed = uuid::Uuid::parse_str(&id).expect("should be a uuid");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn timestamp_id_shape() {
        let id = new_id_with(IdStrategy::Timestamp);
        let (millis, digits) = id.split_once('_').expect("separator");
        assert!(millis.parse::<u128>().is_ok());
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn ids_are_unique() {
        let uuids: HashSet<String> = (0..1000).map(|_| new_id()).collect();
        assert_eq!(uuids.len(), 1000);

        let stamps: HashSet<String> = (0..1000)
            .map(|_| new_id_with(IdStrategy::Timestamp))
            .collect();
        assert_eq!(stamps.len(), 1000);
    }
}
