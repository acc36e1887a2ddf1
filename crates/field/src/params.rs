//! Constants of the secp256k1 base field in the 10x26 limb layout.
//!
//! Limbs 0..=8 carry 26 bits and limb 9 carries 22 bits, so a normalized
//! element spans exactly 256 bits. Everything above that is folded back with
//! `2^256 == 0x1000003D1 (mod p)`.

/// Bits held by limbs 0..=8.
pub const LIMB_BITS: u32 = 26;

/// Bits held by limb 9.
pub const TOP_LIMB_BITS: u32 = 22;

pub const LIMB_MASK: u32 = 0x3FF_FFFF;
pub const TOP_LIMB_MASK: u32 = 0x3F_FFFF;

/// p = 2^256 - 2^32 - 977, split into 10x26 limbs.
pub const MODULUS_LIMBS: [u32; 10] = [
    0x3FF_FC2F, 0x3FF_FFBF, 0x3FF_FFFF, 0x3FF_FFFF, 0x3FF_FFFF,
    0x3FF_FFFF, 0x3FF_FFFF, 0x3FF_FFFF, 0x3FF_FFFF, 0x3F_FFFF,
];

/// Limbs 0 and 1 of p combined into one 52-bit word.
pub const MODULUS_LOW52: u64 = 0xF_FFFE_FFFF_FC2F;

/// p as 32 big-endian bytes.
pub const MODULUS_BYTES: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFE, 0xFF, 0xFF, 0xFC, 0x2F,
];

/// 2^256 mod p = 0x1000003D1: `FOLD_LO` lands in limb 0, `FOLD_HI` (2^32 >> 26)
/// in limb 1.
pub const FOLD_LO: u32 = 0x3D1;
pub const FOLD_HI: u32 = 0x40;

/// 2^260 mod p = 0x1000003D10, the weight of product word 10 relative to
/// word 0. `WIDE_FOLD_HI` (2^36 >> 26) spills into the next limb.
pub const WIDE_FOLD: u64 = 0x10_0000_3D10;
pub const WIDE_FOLD_LO: u64 = 0x3D10;
pub const WIDE_FOLD_HI: u64 = 0x400;

/// Largest magnitude any element may carry. Keeps every limb below 2^31 so
/// limb-wise `u32` arithmetic and normalization cannot overflow.
pub const MAX_MAGNITUDE: u32 = 32;

/// Largest operand magnitude accepted by `mul` and `sqr`.
pub const MAX_MUL_MAGNITUDE: u32 = 8;
