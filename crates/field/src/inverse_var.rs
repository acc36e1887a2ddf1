use k1fe_numeric::{U256, U256Ext};
use tracing::trace;

use crate::context;
use crate::element::FieldElement;

impl FieldElement {
    /// Multiplicative inverse through the extended Euclidean algorithm on
    /// big integers. Same result as [`inv`](Self::inv), including `0 -> 0`,
    /// but the running time depends on the value. Only use it on public
    /// data.
    ///
    /// Accepts any magnitude up to 32; the result is normalized.
    pub fn inv_var(&self) -> Self {
        // Held for the whole call so a concurrent `stop` cannot pull the
        // modulus out from under us.
        let constants = context::acquire();

        let value = U256::from_be_bytes32(&self.normalized().to_b32());
        let inverse = value.mod_inverse_vartime(constants.modulus()).unwrap_or_else(|| {
            trace!(target: "k1fe::inverse", "no inverse for zero, returning zero");
            U256::ZERO
        });
        Self::from_b32(&inverse.to_be_bytes32())
    }
}
