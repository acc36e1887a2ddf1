// 256-bit unsigned integer type.
//
// `U256` is crypto-bigint's `Uint<4>`. Modular add/sub/mul, division and
// the Bernstein-Yang inverter all come from crypto-bigint and are called
// directly. `U256Ext` only adds what has no direct equivalent there: the
// fixed 32-byte big-endian bridge used by the field codec, hex rendering,
// and an `Option`-returning wrapper around the variable-time inverter.

use crypto_bigint::{Encoding, Odd, PrecomputeInverter, Uint};

/// 256-bit unsigned integer, backed by `crypto_bigint::U256`.
pub type U256 = Uint<4>;

/// Extension methods for `U256`.
pub trait U256Ext: Sized {
    /// Construct from a 32-byte big-endian buffer.
    fn from_be_bytes32(bytes: &[u8; 32]) -> Self;

    /// Export as a 32-byte big-endian buffer.
    fn to_be_bytes32(&self) -> [u8; 32];

    /// Render as 64 lowercase hex digits.
    fn to_be_hex(&self) -> String;

    /// Multiplicative inverse of `self` modulo an odd `modulus`, through
    /// crypto-bigint's safegcd inverter. Running time depends on `self`.
    ///
    /// Returns `None` when `modulus` is even (zero included) or when
    /// `gcd(self, modulus) != 1`, in particular for `self == 0`.
    fn mod_inverse_vartime(&self, modulus: &Self) -> Option<Self>;
}

impl U256Ext for U256 {
    fn from_be_bytes32(bytes: &[u8; 32]) -> Self {
        U256::from_be_bytes(*bytes)
    }

    fn to_be_bytes32(&self) -> [u8; 32] {
        self.to_be_bytes()
    }

    fn to_be_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    fn mod_inverse_vartime(&self, modulus: &Self) -> Option<Self> {
        let modulus: Odd<U256> = Option::from(Odd::new(*modulus))?;
        let reduced = self.rem_vartime(modulus.as_nz_ref());
        Option::from(modulus.precompute_inverter().inv_vartime(&reduced))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_bigint::NonZero;

    /// secp256k1 field prime.
    const P: U256 =
        U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");

    fn p_nonzero() -> NonZero<U256> {
        NonZero::new(P).expect("modulus is nonzero")
    }

    #[test]
    fn be_bytes_roundtrip() {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let v = U256::from_be_bytes32(&bytes);
        assert_eq!(v.to_be_bytes32(), bytes);
        assert_eq!(v.as_words()[0], 0x18191a1b1c1d1e1f);
    }

    #[test]
    fn hex_of_prime() {
        assert_eq!(
            P.to_be_hex(),
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
        );
        assert_eq!(U256::from_u64(0x2a).to_be_hex(), format!("{}2a", "0".repeat(62)));
    }

    #[test]
    fn inverse_small_modulus() {
        let m = U256::from_u64(11);
        // 3 * 4 = 12 == 1 mod 11
        assert_eq!(U256::from_u64(3).mod_inverse_vartime(&m), Some(U256::from_u64(4)));
    }

    #[test]
    fn inverse_of_two_mod_p() {
        let inv = U256::from_u64(2).mod_inverse_vartime(&P).unwrap();
        // (p + 1) / 2
        let expected = P.wrapping_add(&U256::ONE).wrapping_shr_vartime(1);
        assert_eq!(inv, expected);
        assert_eq!(inv.mul_mod_vartime(&U256::from_u64(2), &p_nonzero()), U256::ONE);
    }

    #[test]
    fn inverse_of_large_value_mod_p() {
        let a = U256::from_be_hex("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
        let inv = a.mod_inverse_vartime(&P).unwrap();
        assert_eq!(a.mul_mod_vartime(&inv, &p_nonzero()), U256::ONE);
    }

    #[test]
    fn inverse_reduces_oversized_input() {
        // p + 2 == 2 mod p
        let a = P.wrapping_add(&U256::from_u64(2));
        let inv = a.mod_inverse_vartime(&P).unwrap();
        assert_eq!(inv, U256::from_u64(2).mod_inverse_vartime(&P).unwrap());
    }

    #[test]
    fn inverse_missing_cases() {
        assert_eq!(U256::ZERO.mod_inverse_vartime(&P), None);
        assert_eq!(P.mod_inverse_vartime(&P), None);
        assert_eq!(U256::from_u64(3).mod_inverse_vartime(&U256::from_u64(9)), None);
        assert_eq!(U256::ONE.mod_inverse_vartime(&U256::from_u64(8)), None);
        assert_eq!(U256::ONE.mod_inverse_vartime(&U256::ZERO), None);
    }
}
