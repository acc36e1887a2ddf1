use std::fmt;
use std::ops::{Add, AddAssign, Mul};

use crate::params::{
    FOLD_HI, FOLD_LO, LIMB_BITS, LIMB_MASK, MAX_MAGNITUDE, MODULUS_LIMBS, MODULUS_LOW52,
    TOP_LIMB_BITS, TOP_LIMB_MASK,
};

// ---------------------------------------------------------------------------
// FieldElement struct
// ---------------------------------------------------------------------------

/// An element of the secp256k1 base field, `p = 2^256 - 2^32 - 977`.
///
/// Stored as ten `u32` limbs, least significant first: limbs 0..=8 hold 26
/// bits each and limb 9 holds 22 bits. Additions, negations and small-integer
/// multiplications leave carries in the spare limb bits instead of reducing;
/// reduction happens in `mul`/`sqr` (modulo the limb radix) and in
/// [`normalize`](Self::normalize) (modulo `p`).
///
/// Two pieces of bookkeeping travel with every element:
///
/// - `magnitude`: every limb is at most `magnitude` times its maximal value.
///   `mul`/`sqr` need operands with magnitude ≤ 8; nothing may exceed 32.
/// - `normalized`: the limbs are the canonical representative in `[0, p)`.
///   `equal`, `is_zero`, `is_odd` and byte export require it.
///
/// Precondition violations trip `debug_assert!`s; in release builds they are
/// documented contracts, not checked.
#[derive(Clone, Copy)]
pub struct FieldElement {
    pub(crate) n: [u32; 10],
    pub(crate) magnitude: u32,
    pub(crate) normalized: bool,
}

impl FieldElement {
    pub const ZERO: Self = Self::from_int(0);
    pub const ONE: Self = Self::from_int(1);

    /// Element holding the small integer `v`, normalized.
    #[inline]
    pub const fn from_int(v: u32) -> Self {
        Self {
            n: [v & LIMB_MASK, v >> LIMB_BITS, 0, 0, 0, 0, 0, 0, 0, 0],
            magnitude: 1,
            normalized: true,
        }
    }

    /// Raw limbs with an explicit magnitude. The result is not marked
    /// normalized even if the limbs happen to be canonical.
    #[inline]
    pub(crate) const fn from_limbs(n: [u32; 10], magnitude: u32) -> Self {
        Self { n, magnitude, normalized: false }
    }

    #[inline]
    pub fn set_int(&mut self, v: u32) {
        *self = Self::from_int(v);
    }

    #[inline]
    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }

    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// The raw limbs, least significant first.
    #[inline]
    pub fn limbs(&self) -> &[u32; 10] {
        &self.n
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

impl FieldElement {
    /// Reduce to the unique representative in `[0, p)`; magnitude becomes 1.
    ///
    /// Runs the same instruction sequence for every input: the final
    /// subtraction of `p` is applied through an all-ones/all-zeros mask.
    ///
    /// Requires magnitude ≤ 32.
    pub fn normalize(&mut self) {
        debug_assert!(
            self.magnitude <= MAX_MAGNITUDE,
            "normalize: magnitude {} exceeds {}",
            self.magnitude,
            MAX_MAGNITUDE
        );
        let n = &self.n;

        // Carry-propagate; whatever sits above 2^256 ends up in `c`.
        let mut t = [0u32; 10];
        let mut c = n[0];
        t[0] = c & LIMB_MASK;
        for (limb, &x) in t.iter_mut().zip(n.iter()).take(9).skip(1) {
            c = (c >> LIMB_BITS) + x;
            *limb = c & LIMB_MASK;
        }
        c = (c >> LIMB_BITS) + n[9];
        t[9] = c & TOP_LIMB_MASK;
        c >>= TOP_LIMB_BITS;

        // Fold c * 2^256 back in as c * 0x1000003D1. Leaves t untouched when c == 0.
        let mut d = c * FOLD_LO + t[0];
        t[0] = d & LIMB_MASK;
        d = (d >> LIMB_BITS) + t[1] + c * FOLD_HI;
        t[1] = d & LIMB_MASK;
        for limb in t.iter_mut().take(9).skip(2) {
            d = (d >> LIMB_BITS) + *limb;
            *limb = d & LIMB_MASK;
        }
        d = (d >> LIMB_BITS) + t[9];
        t[9] = d & TOP_LIMB_MASK;

        // The fold itself can cross 2^256 once more, but only when t is now
        // tiny, so one more fold into limbs 0..=2 settles it.
        let c = d >> TOP_LIMB_BITS;
        let mut d = c * FOLD_LO + t[0];
        t[0] = d & LIMB_MASK;
        d = (d >> LIMB_BITS) + t[1] + c * FOLD_HI;
        t[1] = d & LIMB_MASK;
        t[2] += d >> LIMB_BITS;
        debug_assert!(t[2] <= LIMB_MASK, "normalize: third fold overflowed");

        // Now t < 2^256 < 2p. Subtract p iff t >= p.
        let mut low = ((t[1] as u64) << LIMB_BITS) | t[0] as u64;
        let below = (t[9] < TOP_LIMB_MASK) as u64
            | (t[8] < LIMB_MASK) as u64
            | (t[7] < LIMB_MASK) as u64
            | (t[6] < LIMB_MASK) as u64
            | (t[5] < LIMB_MASK) as u64
            | (t[4] < LIMB_MASK) as u64
            | (t[3] < LIMB_MASK) as u64
            | (t[2] < LIMB_MASK) as u64
            | (low < MODULUS_LOW52) as u64;
        let mask = 0u64.wrapping_sub(below);
        let limb_mask = mask as u32;
        for limb in t.iter_mut().skip(2) {
            *limb &= limb_mask;
        }
        low -= !mask & MODULUS_LOW52;
        t[0] = (low as u32) & LIMB_MASK;
        t[1] = ((low >> LIMB_BITS) as u32) & LIMB_MASK;

        self.n = t;
        self.magnitude = 1;
        self.normalized = true;
    }

    /// Normalized copy.
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut r = *self;
        r.normalize();
        r
    }
}

// ---------------------------------------------------------------------------
// Predicates (not constant-time)
// ---------------------------------------------------------------------------

impl FieldElement {
    /// Requires a normalized element.
    #[inline]
    pub fn is_zero(&self) -> bool {
        debug_assert!(self.normalized, "is_zero on a non-normalized element");
        self.n.iter().all(|&limb| limb == 0)
    }

    /// Requires a normalized element.
    #[inline]
    pub fn is_odd(&self) -> bool {
        debug_assert!(self.normalized, "is_odd on a non-normalized element");
        self.n[0] & 1 == 1
    }

    /// Limb-wise equality. Both sides must be normalized.
    #[inline]
    pub fn equal(&self, other: &Self) -> bool {
        debug_assert!(self.normalized, "equal: left side not normalized");
        debug_assert!(other.normalized, "equal: right side not normalized");
        self.n == other.n
    }
}

// ---------------------------------------------------------------------------
// Linear operations (no carries, no reduction)
// ---------------------------------------------------------------------------

impl FieldElement {
    /// `-self`, computed as `(m + 1) * p - self` limb by limb.
    ///
    /// `m` is the caller's bound on `self.magnitude`; the result has
    /// magnitude `m + 1`. The subtraction never borrows as long as every
    /// limb of `self` is at most `(m + 1)` times the matching limb of `p`,
    /// which holds whenever `self.magnitude <= m` and also for small
    /// canonical values with `m = 0`.
    pub fn negate(&self, m: u32) -> Self {
        let k = m + 1;
        debug_assert!(k <= MAX_MAGNITUDE, "negate: magnitude {} exceeds {}", k, MAX_MAGNITUDE);
        debug_assert!(
            self.n.iter().zip(MODULUS_LIMBS.iter()).all(|(&a, &p)| a <= p * k),
            "negate: magnitude bound {} too small for operand",
            m
        );
        let mut n = [0u32; 10];
        for (r, (&a, &p)) in n.iter_mut().zip(self.n.iter().zip(MODULUS_LIMBS.iter())) {
            *r = p * k - a;
        }
        Self::from_limbs(n, k)
    }

    /// Multiply every limb by the small integer `k`; magnitude scales by `k`.
    pub fn mul_int(&mut self, k: u32) {
        let magnitude = self.magnitude * k;
        debug_assert!(
            magnitude <= MAX_MAGNITUDE,
            "mul_int: magnitude {} exceeds {}",
            magnitude,
            MAX_MAGNITUDE
        );
        for limb in self.n.iter_mut() {
            *limb *= k;
        }
        self.magnitude = magnitude;
        self.normalized = false;
    }

    /// Limb-wise `self += a`; magnitudes add.
    pub fn add_assign(&mut self, a: &Self) {
        let magnitude = self.magnitude + a.magnitude;
        debug_assert!(
            magnitude <= MAX_MAGNITUDE,
            "add: magnitude {} exceeds {}",
            magnitude,
            MAX_MAGNITUDE
        );
        for (r, &x) in self.n.iter_mut().zip(a.n.iter()) {
            *r += x;
        }
        self.magnitude = magnitude;
        self.normalized = false;
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl AddAssign<&FieldElement> for FieldElement {
    #[inline]
    fn add_assign(&mut self, rhs: &FieldElement) {
        FieldElement::add_assign(self, rhs);
    }
}

impl Add for &FieldElement {
    type Output = FieldElement;
    #[inline]
    fn add(self, rhs: &FieldElement) -> FieldElement {
        let mut r = *self;
        r.add_assign(rhs);
        r
    }
}

impl Mul for &FieldElement {
    type Output = FieldElement;
    #[inline]
    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement::mul(self, rhs)
    }
}

/// Value equality: compares normalized copies, so it is meaningful for any
/// magnitude ≤ 32.
impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.normalized().n == other.normalized().n
    }
}

impl Eq for FieldElement {}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FieldElement(0x{}, magnitude: {}, normalized: {})",
            self.to_hex(),
            self.magnitude,
            self.normalized
        )
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        f.write_str(&self.to_hex())
    }
}
