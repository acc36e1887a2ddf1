//! Fixed exponentiations: square root `a^((p+1)/4)` and inverse `a^(p-2)`.
//!
//! Each exponent is reached by an addition chain written down as data: a
//! table of small powers built from squarings and products, followed by a
//! ladder that shifts the running exponent left by ten bits and adds one of
//! the table entries. The sequence of operations never depends on the value
//! being exponentiated.

use crate::element::FieldElement;

use Precompute::{Multiply, Square};

/// One entry of the precomputed power table. Indices refer to the table with
/// the input itself at index 0.
#[derive(Clone, Copy, Debug)]
enum Precompute {
    Square(usize),
    Multiply(usize, usize),
}

/// `repeat` times: square `squarings` times, then multiply by table entry
/// `multiply_by`.
#[derive(Clone, Copy, Debug)]
struct LadderStep {
    repeat: usize,
    squarings: usize,
    multiply_by: usize,
}

struct AdditionChain {
    table: [Precompute; 16],
    start: usize,
    ladder: &'static [LadderStep],
}

impl AdditionChain {
    fn apply(&self, a: &FieldElement) -> FieldElement {
        let mut powers = [FieldElement::ZERO; 17];
        powers[0] = *a;
        for (i, step) in self.table.iter().enumerate() {
            powers[i + 1] = match *step {
                Square(j) => powers[j].sqr(),
                Multiply(j, k) => powers[j].mul(&powers[k]),
            };
        }

        let mut x = powers[self.start];
        for step in self.ladder {
            for _ in 0..step.repeat {
                for _ in 0..step.squarings {
                    x.sqr_assign();
                }
                x.mul_assign(&powers[step.multiply_by]);
            }
        }
        x
    }
}

/// Powers 1, 2, 3, 6, 12, 15, 30, 60, 120, 240, 255, 510, 750, 780, 1020,
/// 1022, 1023.
static SQRT_CHAIN: AdditionChain = AdditionChain {
    table: [
        Square(0),         // 2
        Multiply(1, 0),    // 3
        Square(2),         // 6
        Square(3),         // 12
        Multiply(4, 2),    // 15
        Square(5),         // 30
        Square(6),         // 60
        Square(7),         // 120
        Square(8),         // 240
        Multiply(9, 5),    // 255
        Square(10),        // 510
        Multiply(11, 9),   // 750
        Multiply(12, 6),   // 780
        Square(11),        // 1020
        Multiply(14, 1),   // 1022
        Multiply(15, 0),   // 1023
    ],
    start: 5,
    ladder: &[
        LadderStep { repeat: 21, squarings: 10, multiply_by: 16 },
        LadderStep { repeat: 1, squarings: 10, multiply_by: 15 },
        LadderStep { repeat: 2, squarings: 10, multiply_by: 16 },
        LadderStep { repeat: 1, squarings: 10, multiply_by: 13 },
    ],
};

/// Powers 1, 2, 3, 4, 5, 10, 11, 21, 42, 45, 63, 126, 252, 504, 1008, 1019,
/// 1023.
static INVERSE_CHAIN: AdditionChain = AdditionChain {
    table: [
        Square(0),         // 2
        Multiply(1, 0),    // 3
        Square(1),         // 4
        Multiply(3, 0),    // 5
        Square(4),         // 10
        Multiply(5, 0),    // 11
        Multiply(6, 5),    // 21
        Square(7),         // 42
        Multiply(8, 2),    // 45
        Multiply(8, 7),    // 63
        Square(10),        // 126
        Square(11),        // 252
        Square(12),        // 504
        Square(13),        // 1008
        Multiply(14, 6),   // 1019
        Multiply(15, 3),   // 1023
    ],
    start: 10,
    ladder: &[
        LadderStep { repeat: 21, squarings: 10, multiply_by: 16 },
        LadderStep { repeat: 1, squarings: 10, multiply_by: 15 },
        LadderStep { repeat: 2, squarings: 10, multiply_by: 16 },
        LadderStep { repeat: 1, squarings: 10, multiply_by: 9 },
    ],
};

impl FieldElement {
    /// `self^((p+1)/4)`, magnitude 1.
    ///
    /// A square root of `self` when `self` is a quadratic residue. For a
    /// non-residue the result is some unrelated value; use
    /// [`sqrt_checked`](Self::sqrt_checked) when that matters.
    /// Requires magnitude ≤ 8.
    pub fn sqrt(&self) -> Self {
        SQRT_CHAIN.apply(self)
    }

    /// Square root, or `None` if `self` is not a quadratic residue.
    pub fn sqrt_checked(&self) -> Option<Self> {
        let r = self.sqrt();
        if r.sqr().normalized().equal(&self.normalized()) {
            Some(r)
        } else {
            None
        }
    }

    /// `self^(p-2)`: the multiplicative inverse, in constant time. Maps 0 to
    /// 0. Requires magnitude ≤ 8; the result has magnitude 1.
    pub fn inv(&self) -> Self {
        INVERSE_CHAIN.apply(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MODULUS_BYTES;
    use k1fe_numeric::{U256, U256Ext};

    fn modulus() -> U256 {
        U256::from_be_bytes32(&MODULUS_BYTES)
    }

    /// Exponent of every table entry, index 0 being 1.
    fn table_exponents(chain: &AdditionChain) -> [u64; 17] {
        let mut e = [0u64; 17];
        e[0] = 1;
        for (i, step) in chain.table.iter().enumerate() {
            e[i + 1] = match *step {
                Square(j) => 2 * e[j],
                Multiply(j, k) => e[j] + e[k],
            };
        }
        e
    }

    /// The exponent the whole chain computes.
    fn chain_exponent(chain: &AdditionChain) -> U256 {
        let table = table_exponents(chain);
        let mut e = U256::from_u64(table[chain.start]);
        for step in chain.ladder {
            for _ in 0..step.repeat {
                e = e
                    .wrapping_shl_vartime(step.squarings as u32)
                    .wrapping_add(&U256::from_u64(table[step.multiply_by]));
            }
        }
        e
    }

    #[test]
    fn sqrt_table_matches_documented_powers() {
        let expected = [1, 2, 3, 6, 12, 15, 30, 60, 120, 240, 255, 510, 750, 780, 1020, 1022, 1023];
        assert_eq!(table_exponents(&SQRT_CHAIN), expected);
    }

    #[test]
    fn inverse_table_matches_documented_powers() {
        let expected = [1, 2, 3, 4, 5, 10, 11, 21, 42, 45, 63, 126, 252, 504, 1008, 1019, 1023];
        assert_eq!(table_exponents(&INVERSE_CHAIN), expected);
    }

    #[test]
    fn sqrt_chain_reaches_p_plus_1_over_4() {
        let target = modulus().wrapping_add(&U256::ONE).wrapping_shr_vartime(2);
        assert_eq!(chain_exponent(&SQRT_CHAIN), target);
    }

    #[test]
    fn inverse_chain_reaches_p_minus_2() {
        let target = modulus().wrapping_sub(&U256::from_u64(2));
        assert_eq!(chain_exponent(&INVERSE_CHAIN), target);
    }

    #[test]
    fn inverse_of_two() {
        let two = FieldElement::from_int(2);
        let inv = two.inv();
        assert_eq!(&inv * &two, FieldElement::ONE);
        assert_eq!(inv.magnitude(), 1);
    }

    #[test]
    fn inverse_of_zero_is_zero() {
        assert_eq!(FieldElement::ZERO.inv(), FieldElement::ZERO);
    }

    #[test]
    fn inverse_of_minus_one_is_minus_one() {
        let minus_one = FieldElement::ONE.negate(1);
        assert_eq!(minus_one.inv(), minus_one);
    }

    #[test]
    fn sqrt_of_small_square() {
        let r = FieldElement::from_int(49).sqrt();
        let seven = FieldElement::from_int(7);
        assert!(r == seven || r == seven.negate(1));
        assert_eq!(r.sqr(), FieldElement::from_int(49));
    }

    #[test]
    fn sqrt_of_zero_and_one() {
        assert_eq!(FieldElement::ZERO.sqrt(), FieldElement::ZERO);
        let r = FieldElement::ONE.sqrt();
        assert_eq!(r.sqr(), FieldElement::ONE);
    }

    #[test]
    fn sqrt_checked_rejects_non_residue() {
        // p == 3 (mod 4), so -1 has no square root.
        assert!(FieldElement::ONE.negate(1).sqrt_checked().is_none());
        assert!(FieldElement::from_int(16).sqrt_checked().is_some());
    }
}
