use crate::element::FieldElement;
use crate::params::{
    FOLD_HI, FOLD_LO, LIMB_BITS, MAX_MUL_MAGNITUDE, TOP_LIMB_BITS, TOP_LIMB_MASK, WIDE_FOLD,
    WIDE_FOLD_HI, WIDE_FOLD_LO,
};

const LIMB_MASK64: u64 = crate::params::LIMB_MASK as u64;

// ---------------------------------------------------------------------------
// Wide product and fast reduction
// ---------------------------------------------------------------------------

/// Fold a 20-word product (26 bits per word, top word unbounded) back into
/// ten limbs, using 2^260 == 0x1000003D10 (mod p) for words 10..=19 and
/// 2^256 == 0x1000003D1 for the carry out of limb 9.
///
/// The output has magnitude 1: limbs 0, 1 and 3..=9 are within their widths
/// and limb 2 may exceed 26 bits by a small carry.
#[inline(always)]
fn reduce_wide(t: &[u32; 20]) -> [u32; 10] {
    let w = |i: usize| t[i] as u64;
    let mut r = [0u32; 10];

    // Limbs 0..=2 stay open for the final fold.
    let mut c = w(0) + w(10) * WIDE_FOLD_LO;
    let t0 = c & LIMB_MASK64;
    c >>= LIMB_BITS;
    c += w(1) + w(10) * WIDE_FOLD_HI + w(11) * WIDE_FOLD_LO;
    let t1 = c & LIMB_MASK64;
    c >>= LIMB_BITS;
    c += w(2) + w(11) * WIDE_FOLD_HI + w(12) * WIDE_FOLD_LO;
    let t2 = c & LIMB_MASK64;
    c >>= LIMB_BITS;

    for i in 3..9 {
        c += w(i) + w(i + 9) * WIDE_FOLD_HI + w(i + 10) * WIDE_FOLD_LO;
        r[i] = (c & LIMB_MASK64) as u32;
        c >>= LIMB_BITS;
    }

    // Word 19 has no neighbour above it, so it takes the whole constant.
    c += w(9) + w(18) * WIDE_FOLD_HI + w(19) * WIDE_FOLD;
    r[9] = (c & TOP_LIMB_MASK as u64) as u32;
    c >>= TOP_LIMB_BITS;

    let mut d = t0 + c * FOLD_LO as u64;
    r[0] = (d & LIMB_MASK64) as u32;
    d >>= LIMB_BITS;
    d += t1 + c * FOLD_HI as u64;
    r[1] = (d & LIMB_MASK64) as u32;
    d >>= LIMB_BITS;
    r[2] = (t2 + d) as u32;
    r
}

/// Schoolbook 10x10 limb product followed by [`reduce_wide`].
///
/// Operand limbs are below 2^30 (magnitude ≤ 8), so each column of at most
/// ten partial products plus the running carry stays well inside `u64`.
#[inline(always)]
fn mul_inner(a: &[u32; 10], b: &[u32; 10]) -> [u32; 10] {
    let mut t = [0u32; 20];
    let mut c: u64 = 0;
    for k in 0usize..19 {
        for i in k.saturating_sub(9)..=k.min(9) {
            c += a[i] as u64 * b[k - i] as u64;
        }
        t[k] = (c & LIMB_MASK64) as u32;
        c >>= LIMB_BITS;
    }
    t[19] = c as u32;
    reduce_wide(&t)
}

/// Squaring variant of [`mul_inner`]: each cross product `a[i] * a[j]`
/// (i < j) is computed once and doubled.
#[inline(always)]
fn sqr_inner(a: &[u32; 10]) -> [u32; 10] {
    let mut t = [0u32; 20];
    let mut c: u64 = 0;
    for k in 0usize..19 {
        let mut i = k.saturating_sub(9);
        while i < k - i {
            c += (a[i] as u64 * 2) * a[k - i] as u64;
            i += 1;
        }
        if i == k - i {
            c += a[i] as u64 * a[i] as u64;
        }
        t[k] = (c & LIMB_MASK64) as u32;
        c >>= LIMB_BITS;
    }
    t[19] = c as u32;
    reduce_wide(&t)
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

impl FieldElement {
    /// `self * b mod p`, magnitude 1, not normalized.
    ///
    /// Both operands must have magnitude ≤ 8.
    #[inline]
    pub fn mul(&self, b: &Self) -> Self {
        debug_assert!(
            self.magnitude <= MAX_MUL_MAGNITUDE,
            "mul: left magnitude {} exceeds {}",
            self.magnitude,
            MAX_MUL_MAGNITUDE
        );
        debug_assert!(
            b.magnitude <= MAX_MUL_MAGNITUDE,
            "mul: right magnitude {} exceeds {}",
            b.magnitude,
            MAX_MUL_MAGNITUDE
        );
        Self::from_limbs(mul_inner(&self.n, &b.n), 1)
    }

    /// `self^2 mod p`, magnitude 1, not normalized.
    ///
    /// The operand must have magnitude ≤ 8.
    #[inline]
    pub fn sqr(&self) -> Self {
        debug_assert!(
            self.magnitude <= MAX_MUL_MAGNITUDE,
            "sqr: magnitude {} exceeds {}",
            self.magnitude,
            MAX_MUL_MAGNITUDE
        );
        Self::from_limbs(sqr_inner(&self.n), 1)
    }

    /// In-place `self = self * b`.
    #[inline]
    pub fn mul_assign(&mut self, b: &Self) {
        *self = self.mul(b);
    }

    /// In-place `self = self^2`.
    #[inline]
    pub fn sqr_assign(&mut self) {
        *self = self.sqr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{LIMB_MASK, MODULUS_LIMBS};

    #[test]
    fn small_products() {
        let a = FieldElement::from_int(3);
        let b = FieldElement::from_int(5);
        assert_eq!(a.mul(&b), FieldElement::from_int(15));
        assert_eq!(&a * &b, FieldElement::from_int(15));
        assert_eq!(a.sqr(), FieldElement::from_int(9));
    }

    #[test]
    fn product_crossing_limb_boundary() {
        // 2^26 * 2^26 = 2^52 lands in limb 2.
        let a = FieldElement::from_int(1 << 26);
        let mut r = a.sqr();
        r.normalize();
        assert_eq!(r.limbs(), &[0, 0, 1, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn minus_one_squared_is_one() {
        let minus_one = FieldElement::ONE.negate(1);
        let mut r = minus_one.sqr();
        r.normalize();
        assert!(r.equal(&FieldElement::ONE));

        let mut r = minus_one.mul(&minus_one);
        r.normalize();
        assert!(r.equal(&FieldElement::ONE));
    }

    #[test]
    fn output_is_magnitude_one_and_not_normalized() {
        let r = FieldElement::from_int(2).mul(&FieldElement::from_int(2));
        assert_eq!(r.magnitude(), 1);
        assert!(!r.is_normalized());
    }

    #[test]
    fn all_max_limbs_at_magnitude_eight() {
        // 8 * (2^256 - 1) squared, against the same value via mul.
        let mut n = [LIMB_MASK * 8; 10];
        n[9] = TOP_LIMB_MASK * 8;
        let a = FieldElement::from_limbs(n, 8);
        assert_eq!(a.sqr(), a.mul(&a));

        // 8 * (2^256 - 1) == 8 * 0x1000003D0 (mod p)
        let mut small = FieldElement::from_limbs([0x3D0, 0x40, 0, 0, 0, 0, 0, 0, 0, 0], 1);
        small.mul_int(8);
        assert_eq!(a, small);
        assert_eq!(a.sqr(), small.sqr());
    }

    #[test]
    fn modulus_times_anything_is_zero() {
        let p = FieldElement::from_limbs(MODULUS_LIMBS, 1);
        let mut r = p.mul(&FieldElement::from_int(12345));
        r.normalize();
        assert!(r.is_zero());
    }

    #[test]
    fn assign_variants_match() {
        let a = FieldElement::from_int(11);
        let mut x = a;
        x.mul_assign(&a);
        let mut y = a;
        y.sqr_assign();
        assert_eq!(x, y);
        assert_eq!(x, FieldElement::from_int(121));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "magnitude")]
    fn mul_rejects_magnitude_nine() {
        let mut a = FieldElement::from_int(1);
        a.mul_int(9);
        let _ = a.mul(&FieldElement::ONE);
    }
}
