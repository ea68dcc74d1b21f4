//! Arithmetic circuit construction.
//!
//! Only addition is provided: a one-bit full adder and the ripple-carry
//! adder composed from it. Both are added as methods on
//! [`Circuit`](crate::circuit::Circuit).

mod adder;
