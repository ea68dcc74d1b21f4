//! Full adder and ripple-carry adder construction.
//!
//! The ripple-carry adder is built recursively, least significant bit first:
//! bit 0 goes through a one-bit full adder, the remaining high bits are added
//! recursively with the produced carry, and the two partial sums are
//! concatenated. A `w`-bit adder is therefore a chain of `w` full adders with
//! an O(w) carry path.

use tracing::debug;

use crate::circuit::{Circuit, Operand, Signal, expect_width};
use crate::common::Result;

impl Circuit {
    /// One-bit full adder: returns `(sum, carry_out)`.
    ///
    /// `sum = a ^ b ^ carry_in` and
    /// `carry_out = (a & b) | (a & carry_in) | (b & carry_in)`.
    /// All three inputs must be exactly one bit wide.
    pub fn one_bit_add(&mut self, a: Signal, b: Signal, carry_in: Signal) -> Result<(Signal, Signal)> {
        let a = expect_width("one_bit_add", 1, self.check(a)?)?;
        let b = expect_width("one_bit_add", 1, self.check(b)?)?;
        let cin = expect_width("one_bit_add", 1, self.check(carry_in)?)?;

        let ab = self.xor(a, b)?;
        let sum = self.xor(ab, cin)?;

        let a_and_b = self.and(a, b)?;
        let a_and_c = self.and(a, cin)?;
        let b_and_c = self.and(b, cin)?;
        let partial = self.or(a_and_b, a_and_c)?;
        let carry_out = self.or(partial, b_and_c)?;
        Ok((sum, carry_out))
    }

    /// Ripple-carry adder with a carry-in of zero. See [`Circuit::ripple_add_with_carry`].
    pub fn ripple_add(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Result<(Signal, Signal)> {
        self.ripple_add_with_carry(a, b, false)
    }

    /// Ripple-carry adder: returns `(sum, carry_out)`.
    ///
    /// The operands are first matched to a common width `w`; `sum` is the
    /// `w`-bit sum `(a + b + carry_in) mod 2^w` and `carry_out` the final
    /// carry. `carry_in` must be one bit wide; a bare value becomes a
    /// one-bit constant.
    pub fn ripple_add_with_carry(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        carry_in: impl Into<Operand>,
    ) -> Result<(Signal, Signal)> {
        let (a, b, carry_in): (Operand, Operand, Operand) = (a.into(), b.into(), carry_in.into());
        let first_node = self.nodes().len();
        let result = self.with_rollback(|c| {
            let a = c.operand(a)?;
            let b = c.operand(b)?;
            let cin = c.operand_with_width(carry_in, 1, "ripple_add")?;
            let (a, b) = c.match_bitwidth(a, b)?;
            c.ripple(a, b, cin)
        })?;
        debug!(
            width = result.0.width(),
            nodes = self.nodes().len() - first_node,
            "built ripple-carry adder"
        );
        Ok(result)
    }

    fn ripple(&mut self, a: Signal, b: Signal, carry_in: Signal) -> Result<(Signal, Signal)> {
        let a = expect_width("ripple_add", b.width(), a)?;
        let width = a.width();
        let a_lsb = self.bit(a, 0)?;
        let b_lsb = self.bit(b, 0)?;
        if width == 1 {
            return self.one_bit_add(a_lsb, b_lsb, carry_in);
        }

        let (lsb_sum, ripple_carry) = self.one_bit_add(a_lsb, b_lsb, carry_in)?;
        let a_high = self.select(a, 1, width - 1)?;
        let b_high = self.select(b, 1, width - 1)?;
        let (msb_sum, carry_out) = self.ripple(a_high, b_high, ripple_carry)?;
        let sum = self.concat(msb_sum, lsb_sum)?;
        Ok((sum, carry_out))
    }
}
