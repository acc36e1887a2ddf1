// Numeric types backing the secp256k1 field engine.
//
// - uint256: `U256` over crypto-bigint, plus the byte/hex bridge and the
//   `Option`-returning variable-time inverse the field engine delegates to
// - random: seeded RNG used by randomized tests

pub mod random;
pub mod uint256;

pub use crypto_bigint::{NonZero, Odd};
pub use uint256::{U256, U256Ext};
