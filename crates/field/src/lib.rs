//! Arithmetic in the secp256k1 base field, `p = 2^256 - 2^32 - 977`.
//!
//! Elements use ten 26-bit limbs with lazy reduction: additions and small
//! multiples accumulate in spare limb bits, `mul`/`sqr` reduce modulo the
//! limb radix, and `normalize` brings a value back to `[0, p)`.
//!
//! The variable-time inverse reads the modulus from a process-wide
//! [`FieldConstants`]; hosts call [`start`]/[`start_with`] once at startup
//! and [`stop`] at shutdown, though [`acquire`] also starts lazily.

pub mod codec;
pub mod config;
pub mod context;
pub mod element;
pub mod error;
pub mod params;

mod chains;
mod inverse_var;
mod mul;

pub use codec::HEX_BUFFER_LEN;
pub use config::{FieldConfig, HexDecodeMode, HEX_DECODE_ENV};
pub use context::{acquire, is_started, start, start_with, stop, FieldConstants};
pub use element::FieldElement;
pub use error::FieldError;
