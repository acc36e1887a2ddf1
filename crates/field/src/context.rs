use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use k1fe_numeric::{U256, U256Ext};
use tracing::debug;

use crate::config::{FieldConfig, HexDecodeMode};
use crate::params::MODULUS_BYTES;

/// Process-wide state shared by every field element: the modulus as a big
/// integer (for the variable-time inverse) and the active configuration.
#[derive(Debug)]
pub struct FieldConstants {
    modulus: U256,
    config: FieldConfig,
}

impl FieldConstants {
    fn new(config: FieldConfig) -> Self {
        Self {
            modulus: U256::from_be_bytes32(&MODULUS_BYTES),
            config,
        }
    }

    pub fn modulus(&self) -> &U256 {
        &self.modulus
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Global singleton
// ---------------------------------------------------------------------------

static FIELD_CONSTANTS: Mutex<Option<Arc<FieldConstants>>> = Mutex::new(None);

// The slot only ever holds a fully built value, so a poisoned lock is safe
// to reuse.
fn slot() -> MutexGuard<'static, Option<Arc<FieldConstants>>> {
    FIELD_CONSTANTS.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Build the shared constants with the default configuration.
///
/// Idempotent: once started, further calls leave the existing state alone.
pub fn start() {
    start_with(FieldConfig::default());
}

/// Build the shared constants with `config`.
///
/// Idempotent like [`start`]; a later call with a different configuration is
/// ignored until [`stop`] has been called.
pub fn start_with(config: FieldConfig) {
    let mut guard = slot();
    match guard.as_ref() {
        Some(existing) => {
            if existing.config != config {
                debug!(
                    target: "k1fe::context",
                    active = ?existing.config,
                    requested = ?config,
                    "field constants already started, keeping active config"
                );
            }
        }
        None => {
            *guard = Some(Arc::new(FieldConstants::new(config)));
            debug!(target: "k1fe::context", hex_decode = %config.hex_decode, "field constants started");
        }
    }
}

/// Drop the global handle. Callers still holding an `Arc` from [`acquire`]
/// keep a valid copy until they release it. Calling `stop` when nothing is
/// started does nothing.
pub fn stop() {
    if slot().take().is_some() {
        debug!(target: "k1fe::context", "field constants stopped");
    }
}

/// The shared constants, starting them with the default configuration if
/// necessary.
pub fn acquire() -> Arc<FieldConstants> {
    slot()
        .get_or_insert_with(|| {
            debug!(target: "k1fe::context", "field constants started lazily");
            Arc::new(FieldConstants::new(FieldConfig::default()))
        })
        .clone()
}

pub fn is_started() -> bool {
    slot().is_some()
}

/// Hex decoding mode of the running configuration, or the default when
/// nothing is started. Does not start anything.
pub(crate) fn hex_decode_mode() -> HexDecodeMode {
    slot()
        .as_ref()
        .map(|constants| constants.config.hex_decode)
        .unwrap_or_default()
}

/// Serializes tests that start, stop or reconfigure the global constants.
#[cfg(test)]
pub(crate) static LIFECYCLE_TEST_LOCK: Mutex<()> = Mutex::new(());

#[cfg(test)]
pub(crate) fn lifecycle_test_guard() -> MutexGuard<'static, ()> {
    LIFECYCLE_TEST_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_starts_lazily() {
        let _guard = lifecycle_test_guard();
        stop();
        assert!(!is_started());
        let constants = acquire();
        assert!(is_started());
        assert_eq!(constants.modulus().to_be_bytes32(), MODULUS_BYTES);
        assert_eq!(*constants.config(), FieldConfig::default());
    }

    #[test]
    fn start_is_idempotent() {
        let _guard = lifecycle_test_guard();
        stop();
        start();
        let first = acquire();
        start();
        start_with(FieldConfig::default().with_hex_decode(HexDecodeMode::Strict));
        let second = acquire();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.config().hex_decode, HexDecodeMode::Permissive);
        stop();
    }

    #[test]
    fn stop_keeps_outstanding_handles_alive() {
        let _guard = lifecycle_test_guard();
        start();
        let held = acquire();
        stop();
        assert!(!is_started());
        assert_eq!(held.modulus().to_be_bytes32(), MODULUS_BYTES);

        // A fresh start builds a new instance.
        start();
        assert!(!Arc::ptr_eq(&held, &acquire()));
        stop();
        stop();
    }

    #[test]
    fn configured_mode_is_visible() {
        let _guard = lifecycle_test_guard();
        stop();
        assert_eq!(hex_decode_mode(), HexDecodeMode::Permissive);
        assert!(!is_started());
        start_with(FieldConfig::default().with_hex_decode(HexDecodeMode::Strict));
        assert_eq!(hex_decode_mode(), HexDecodeMode::Strict);
        stop();
    }

    #[test]
    fn concurrent_acquire_shares_one_instance() {
        let _guard = lifecycle_test_guard();
        stop();
        let handles: Vec<_> = (0..8).map(|_| std::thread::spawn(acquire)).collect();
        let all: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for c in &all[1..] {
            assert!(Arc::ptr_eq(&all[0], c));
        }
        stop();
    }
}
