//! Conversions between field elements and bytes, hex strings and `U256`.
//!
//! Byte import and export walk the value in 2-bit windows. 26 is even, so a
//! window never straddles two limbs and limb 9 ends exactly at bit 256.

use k1fe_numeric::{U256, U256Ext};

use crate::config::HexDecodeMode;
use crate::context;
use crate::element::FieldElement;
use crate::error::FieldError;
use crate::params::LIMB_BITS;

/// Capacity `write_hex` needs: 64 digits and a NUL terminator.
pub const HEX_BUFFER_LEN: usize = 65;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Marks a byte that is not a hex digit in [`NIBBLES`].
const NOT_HEX: u8 = 0xFF;

/// ASCII byte to nibble value.
static NIBBLES: [u8; 256] = {
    let mut table = [NOT_HEX; 256];
    let mut i = 0;
    while i < 10 {
        table[b'0' as usize + i] = i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 6 {
        table[b'a' as usize + i] = 10 + i as u8;
        table[b'A' as usize + i] = 10 + i as u8;
        i += 1;
    }
    table
};

#[inline(always)]
const fn window(bit: usize) -> (usize, usize) {
    (bit / LIMB_BITS as usize, bit % LIMB_BITS as usize)
}

impl FieldElement {
    /// Load a 32-byte big-endian value.
    ///
    /// The result is marked normalized with magnitude 1. Values at or above
    /// `p` are kept unreduced; normalize before relying on canonical form.
    pub fn set_b32(&mut self, a: &[u8; 32]) {
        let mut n = [0u32; 10];
        for i in 0..32 {
            let byte = a[31 - i];
            for j in 0..4 {
                let (limb, shift) = window(8 * i + 2 * j);
                n[limb] |= (((byte >> (2 * j)) & 0x3) as u32) << shift;
            }
        }
        self.n = n;
        self.magnitude = 1;
        self.normalized = true;
    }

    pub fn from_b32(a: &[u8; 32]) -> Self {
        let mut r = Self::ZERO;
        r.set_b32(a);
        r
    }

    /// Export as 32 big-endian bytes. Requires a normalized element.
    pub fn to_b32(&self) -> [u8; 32] {
        debug_assert!(self.normalized, "to_b32 on a non-normalized element");
        let mut r = [0u8; 32];
        for i in 0..32 {
            let mut c = 0u8;
            for j in 0..4 {
                let (limb, shift) = window(8 * i + 2 * j);
                c |= (((self.n[limb] >> shift) & 0x3) as u8) << (2 * j);
            }
            r[31 - i] = c;
        }
        r
    }

    /// Load a big-endian value of at most 32 bytes, left-padded with zeros.
    pub fn set_bytes(&mut self, a: &[u8]) -> Result<(), FieldError> {
        if a.len() > 32 {
            return Err(FieldError::TooManyBytes { len: a.len() });
        }
        let mut buf = [0u8; 32];
        buf[32 - a.len()..].copy_from_slice(a);
        self.set_b32(&buf);
        Ok(())
    }

    pub fn from_bytes(a: &[u8]) -> Result<Self, FieldError> {
        let mut r = Self::ZERO;
        r.set_bytes(a)?;
        Ok(r)
    }

    /// Write the normalized value as 64 lowercase hex digits followed by a
    /// NUL byte.
    ///
    /// Returns the number of bytes the encoding takes ([`HEX_BUFFER_LEN`]).
    /// If `out` is shorter than that nothing is written; callers compare the
    /// return value with their buffer length.
    pub fn write_hex(&self, out: &mut [u8]) -> usize {
        if out.len() < HEX_BUFFER_LEN {
            return HEX_BUFFER_LEN;
        }
        let bytes = self.normalized().to_b32();
        for (i, b) in bytes.iter().enumerate() {
            out[2 * i] = HEX_DIGITS[(b >> 4) as usize];
            out[2 * i + 1] = HEX_DIGITS[(b & 0xF) as usize];
        }
        out[64] = 0;
        HEX_BUFFER_LEN
    }

    /// 64 lowercase hex digits of the normalized value.
    pub fn to_hex(&self) -> String {
        hex::encode(self.normalized().to_b32())
    }

    /// Permissive hex import.
    ///
    /// Digits are right-aligned: short input is zero-padded on the left and
    /// input longer than 64 digits keeps only its last 64. Characters that
    /// are not hex digits count as 0.
    pub fn set_hex(&mut self, s: &str) {
        let mut buf = [0u8; 32];
        for (pos, &ch) in s.as_bytes().iter().rev().take(64).enumerate() {
            let nibble = match NIBBLES[ch as usize] {
                NOT_HEX => 0,
                v => v,
            };
            buf[31 - pos / 2] |= if pos % 2 == 0 { nibble } else { nibble << 4 };
        }
        self.set_b32(&buf);
    }

    /// Hex import under an explicit decoding mode.
    pub fn from_hex_with(s: &str, mode: HexDecodeMode) -> Result<Self, FieldError> {
        if mode == HexDecodeMode::Strict {
            if s.len() > 64 {
                return Err(FieldError::HexTooLong { len: s.len() });
            }
            if let Some((index, ch)) = s.char_indices().find(|&(_, ch)| {
                !ch.is_ascii() || NIBBLES[ch as usize] == NOT_HEX
            }) {
                return Err(FieldError::InvalidHexDigit { index, ch });
            }
        }
        let mut r = Self::ZERO;
        r.set_hex(s);
        Ok(r)
    }

    /// Hex import using the mode of the active [`FieldConfig`](crate::FieldConfig).
    ///
    /// Permissive mode (the default) never fails.
    pub fn from_hex(s: &str) -> Result<Self, FieldError> {
        Self::from_hex_with(s, context::hex_decode_mode())
    }

    /// The normalized value as a `U256`.
    pub fn to_uint(&self) -> U256 {
        U256::from_be_bytes32(&self.normalized().to_b32())
    }

    /// Load a `U256`. Like [`set_b32`](Self::set_b32), values at or above
    /// `p` are kept unreduced.
    pub fn from_uint(v: &U256) -> Self {
        Self::from_b32(&v.to_be_bytes32())
    }
}
