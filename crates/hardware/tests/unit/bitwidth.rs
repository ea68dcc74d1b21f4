//! # Bit-Width Tests
//!
//! Width matching, zero-extension, and the bit-level operators built on them.

use ripplesim_core::common::{CircuitError, Result};
use ripplesim_core::{Circuit, Simulator};

#[test]
fn matching_extends_the_narrower_signal() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 2)?;
    let b = c.input("b", 5)?;
    let (a2, b2) = c.match_bitwidth(a, b)?;
    assert_eq!(a2.width(), 5);
    assert_eq!(b2, b);

    let mut sim = Simulator::new(&c, &[])?;
    sim.step_with([("a", 3), ("b", 0)])?;
    assert_eq!(sim.read(a2)?, 3);
    Ok(())
}

#[test]
fn matching_equal_widths_is_a_no_op() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 4)?;
    let b = c.input("b", 4)?;
    let nodes = c.nodes().len();
    assert_eq!(c.match_bitwidth(a, b)?, (a, b));
    assert_eq!(c.nodes().len(), nodes);
    Ok(())
}

#[test]
fn matching_is_idempotent() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 1)?;
    let b = c.input("b", 7)?;
    let first = c.match_bitwidth(a, b)?;
    let second = c.match_bitwidth(first.0, first.1)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn matching_many_signals() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 1)?;
    let b = c.input("b", 3)?;
    let d = c.input("d", 8)?;
    let matched = c.match_bitwidths(&[a, b, d])?;
    assert!(matched.iter().all(|s| s.width() == 8));
    assert_eq!(matched[2], d);
    assert!(c.match_bitwidths(&[])?.is_empty());
    Ok(())
}

#[test]
fn zero_extend_never_truncates() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 6)?;
    assert_eq!(c.zero_extend(a, 6)?, a);
    assert_eq!(
        c.zero_extend(a, 4),
        Err(CircuitError::WidthMismatch {
            op: "zero_extend",
            expected: 4,
            found: 6
        })
    );
    Ok(())
}

#[test]
fn select_bit_and_concat() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 8)?;
    let high = c.select(a, 4, 4)?;
    let top = c.bit(a, 7)?;
    let swapped = {
        let low = c.select(a, 0, 4)?;
        c.concat(low, high)?
    };
    assert_eq!(high.width(), 4);
    assert_eq!(swapped.width(), 8);
    assert_eq!(c.select(a, 0, 8)?, a);

    let mut sim = Simulator::new(&c, &[])?;
    sim.step_with([("a", 0xa5)])?;
    assert_eq!(sim.read(high)?, 0xa);
    assert_eq!(sim.read(top)?, 1);
    assert_eq!(sim.read(swapped)?, 0x5a);
    Ok(())
}

#[test]
fn select_out_of_range_is_rejected() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 4)?;
    assert_eq!(
        c.select(a, 2, 3),
        Err(CircuitError::BitRange {
            low: 2,
            width: 3,
            source_width: 4
        })
    );
    assert!(c.bit(a, 4).is_err());
    assert!(c.select(a, u32::MAX, 2).is_err());
    Ok(())
}

#[test]
fn not_stays_within_width() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.constant(0b01, 2)?;
    let n = c.not(a)?;
    let mut sim = Simulator::new(&c, &[])?;
    sim.step(1)?;
    assert_eq!(sim.read(n)?, 0b10);
    Ok(())
}

#[test]
fn full_width_values_do_not_overflow() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.constant(u128::MAX, 128)?;
    let (sum, carry) = c.ripple_add(a, 1u8)?;
    assert_eq!(c.concat(a, carry), Err(CircuitError::InvalidWidth { width: 129 }));

    let mut sim = Simulator::new(&c, &[])?;
    sim.step(1)?;
    assert_eq!(sim.read(sum)?, 0);
    assert_eq!(sim.read(carry)?, 1);
    Ok(())
}
