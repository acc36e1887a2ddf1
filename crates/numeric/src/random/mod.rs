// Seeded random number generation for reproducible randomized tests.
//
// `DebugRng` wraps `rand`'s `StdRng`. Nothing here is used by the field
// arithmetic itself.

use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::uint256::U256Ext;
use crate::U256;

/// Deterministic RNG for testing, seeded from a u64.
pub struct DebugRng {
    inner: StdRng,
}

impl DebugRng {
    pub fn new(seed: u64) -> Self {
        Self { inner: StdRng::seed_from_u64(seed) }
    }

    pub fn get_random_u64(&mut self) -> u64 {
        self.inner.random()
    }

    pub fn get_random_bytes32(&mut self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.inner.fill_bytes(&mut out);
        out
    }

    pub fn get_random_u256(&mut self) -> U256 {
        U256::from_be_bytes32(&self.get_random_bytes32())
    }

    /// Uniform value in `[0, bound)` by rejection sampling over full
    /// 256-bit draws. Only sensible for bounds close to 2^256, such as a
    /// 256-bit prime.
    ///
    /// Panics if `bound` is zero.
    pub fn get_random_u256_below(&mut self, bound: &U256) -> U256 {
        assert!(*bound != U256::ZERO, "bound must be nonzero");
        loop {
            let v = self.get_random_u256();
            if v < *bound {
                return v;
            }
        }
    }
}
