//! # Circuit Construction Tests
//!
//! Naming, drive discipline, foreign handles, and the checks performed when a
//! graph is handed to a simulator.

use pretty_assertions::assert_eq;

use ripplesim_core::common::{CircuitError, FinalizeError, Result};
use ripplesim_core::{Circuit, Entity, Simulator};

use crate::common::harness::counter_circuit;

#[test]
fn widths_are_validated() {
    let mut c = Circuit::new();
    assert_eq!(c.register("r", 0).err(), Some(CircuitError::InvalidWidth { width: 0 }));
    assert_eq!(c.constant(0, 129).err(), Some(CircuitError::InvalidWidth { width: 129 }));
    assert_eq!(
        c.constant(8, 3).err(),
        Some(CircuitError::ValueOutOfRange { value: 8, width: 3 })
    );
    assert!(c.register_with_reset("r", 2, 4).is_err());
    assert!(c.nodes().is_empty());
    assert!(c.registers().is_empty());
}

#[test]
fn names_are_unique_per_circuit() -> Result<()> {
    let mut c = Circuit::new();
    let _ = c.register("x", 4)?;
    assert_eq!(c.register("x", 4).err(), Some(CircuitError::DuplicateName("x".into())));
    assert_eq!(c.input("x", 1).err(), Some(CircuitError::DuplicateName("x".into())));
    let one = c.constant(1, 1)?;
    assert_eq!(c.name(one, "x").err(), Some(CircuitError::DuplicateName("x".into())));

    let mut other = Circuit::new();
    let _ = other.register("x", 4)?;
    Ok(())
}

#[test]
fn lookup_by_name() -> Result<()> {
    let mut c = Circuit::new();
    let r = c.register("r", 2)?;
    let i = c.input("i", 2)?;
    let s = c.xor(r.signal(), i)?;
    let s = c.name(s, "s")?;
    let _ = c.name(s, "alias")?;

    assert_eq!(c.lookup("r")?, Entity::Register(r));
    assert_eq!(c.lookup("i")?, Entity::Signal(i));
    assert_eq!(c.lookup("alias")?, Entity::Signal(s));
    assert_eq!(c.entity_name(s.into()), "s");
    assert_eq!(c.lookup("nope").err(), Some(CircuitError::UnknownName("nope".into())));

    let names: Vec<String> = c.named_entities().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["alias", "i", "r", "s"]);
    Ok(())
}

#[test]
fn register_is_driven_once() -> Result<()> {
    let mut c = Circuit::new();
    let r = c.register("r", 3)?;
    r.drive_next(&mut c, 0u8)?;
    assert_eq!(
        r.drive_next(&mut c, 1u8).err(),
        Some(CircuitError::AlreadyDriven("r".into()))
    );
    Ok(())
}

#[test]
fn register_next_must_match_width() -> Result<()> {
    let mut c = Circuit::new();
    let r = c.register("r", 3)?;
    let narrow = c.constant(1, 2)?;
    assert_eq!(
        r.drive_next(&mut c, narrow).err(),
        Some(CircuitError::WidthMismatch {
            op: "drive_next",
            expected: 3,
            found: 2
        })
    );
    assert!(c.registers()[r.id().index()].next().is_none());
    Ok(())
}

#[test]
fn gates_require_equal_widths() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 2)?;
    let b = c.input("b", 3)?;
    assert_eq!(
        c.and(a, b).err(),
        Some(CircuitError::WidthMismatch {
            op: "and",
            expected: 2,
            found: 3
        })
    );
    assert!(c.or(a, b).is_err());
    assert!(c.xor(b, a).is_err());
    Ok(())
}

#[test]
fn foreign_signals_are_rejected() -> Result<()> {
    let mut first = Circuit::new();
    let mut second = Circuit::new();
    let a = first.input("a", 1)?;
    let b = second.input("b", 1)?;
    let r = second.register("r", 1)?;

    assert_eq!(second.and(a, b).err(), Some(CircuitError::ForeignSignal));
    assert_eq!(second.not(a).err(), Some(CircuitError::ForeignSignal));
    assert_eq!(second.ripple_add(a, b).err(), Some(CircuitError::ForeignSignal));
    assert_eq!(r.drive_next(&mut first, 0u8).err(), Some(CircuitError::ForeignSignal));
    assert_eq!(r.drive_next(&mut second, a).err(), Some(CircuitError::ForeignSignal));
    r.drive_next(&mut second, b)?;
    assert_eq!(
        Simulator::new(&second, &[a.into()]).err(),
        Some(CircuitError::ForeignSignal)
    );
    Ok(())
}

#[test]
fn undriven_register_blocks_simulation() -> Result<()> {
    let mut c = Circuit::new();
    let _ = c.register("idle", 4)?;
    assert_eq!(
        Simulator::new(&c, &[]).err(),
        Some(CircuitError::GraphNotFinalized(FinalizeError::UndrivenRegister(
            "idle".into()
        )))
    );
    Ok(())
}

#[test]
fn undriven_wire_blocks_simulation() -> Result<()> {
    let mut c = Circuit::new();
    let w = c.wire(2)?;
    assert_eq!(
        Simulator::new(&c, &[]).err(),
        Some(CircuitError::GraphNotFinalized(FinalizeError::UndrivenWire(w.id())))
    );
    Ok(())
}

#[test]
fn wires_forward_declare_signals() -> Result<()> {
    let mut c = Circuit::new();
    let w = c.wire(4)?;
    let doubled = c.concat(w, w)?;
    let value = c.constant(0b1001, 4)?;
    c.drive_wire(w, value)?;
    assert!(matches!(c.drive_wire(w, value), Err(CircuitError::AlreadyDriven(_))));
    assert!(matches!(c.drive_wire(value, w), Err(CircuitError::AlreadyDriven(_))));

    let mut sim = Simulator::new(&c, &[])?;
    sim.step(1)?;
    assert_eq!(sim.read(doubled)?, 0b1001_1001);
    Ok(())
}

#[test]
fn combinational_loop_is_detected() -> Result<()> {
    let mut c = Circuit::new();
    let w = c.wire(1)?;
    let n = c.not(w)?;
    c.drive_wire(w, n)?;

    let path = c.find_combinational_loop().unwrap_or_default();
    assert_eq!(path.len(), 2);
    assert!(path.contains(&w.id()) && path.contains(&n.id()));
    assert!(matches!(
        Simulator::new(&c, &[]),
        Err(CircuitError::CombinationalCycle { .. })
    ));
    Ok(())
}

#[test]
fn loop_through_register_is_not_combinational() -> Result<()> {
    let (c, _, _) = counter_circuit(3)?;
    assert_eq!(c.find_combinational_loop(), None);
    Ok(())
}

#[test]
fn failed_calls_leave_the_graph_unchanged() -> Result<()> {
    let (mut c, counter, _) = counter_circuit(3)?;
    let nodes = c.nodes().len();
    let narrow = c.constant(0, 2)?;
    assert!(c.and(counter.signal(), narrow).is_err());
    assert!(c.select(counter.signal(), 2, 2).is_err());
    assert!(c.register("counter", 1).is_err());
    assert_eq!(c.nodes().len(), nodes + 1);
    assert_eq!(c.registers().len(), 1);
    Ok(())
}

#[test]
fn failed_adder_calls_leave_the_graph_unchanged() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 4)?;
    let nodes = c.nodes().len();
    assert_eq!(
        c.ripple_add_with_carry(9u8, a, 2u8).err(),
        Some(CircuitError::ValueOutOfRange { value: 2, width: 1 })
    );
    assert_eq!(c.nodes().len(), nodes);

    let mut other = Circuit::new();
    let foreign = other.input("b", 8)?;
    assert_eq!(c.ripple_add(200u8, foreign).err(), Some(CircuitError::ForeignSignal));
    assert_eq!(c.ripple_add(a, foreign).err(), Some(CircuitError::ForeignSignal));
    assert_eq!(c.nodes().len(), nodes);

    let (sum, _) = c.ripple_add(9u8, a)?;
    let mut sim = Simulator::new(&c, &[])?;
    sim.step_with([("a", 3)])?;
    assert_eq!(sim.read(sum)?, 12);
    assert_eq!(sim.stats.node_evaluations, c.nodes().len() as u64);
    Ok(())
}

#[test]
fn anonymous_signal_names_are_reserved() -> Result<()> {
    let mut c = Circuit::new();
    let a = c.input("a", 1)?;
    let b = c.input("b", 1)?;
    let x = c.xor(a, b)?;
    assert_eq!(c.entity_name(x.into()), "n2");
    assert_eq!(c.name(x, "n2").err(), Some(CircuitError::DuplicateName("n2".into())));
    assert_eq!(c.name(x, "n17").err(), Some(CircuitError::DuplicateName("n17".into())));
    assert_eq!(c.register("n0", 1).err(), Some(CircuitError::DuplicateName("n0".into())));
    assert_eq!(c.input("n9", 1).err(), Some(CircuitError::DuplicateName("n9".into())));

    let _ = c.name(x, "n")?;
    let _ = c.name(x, "net")?;
    let _ = c.name(x, "n2x")?;
    Ok(())
}

#[test]
fn handles_from_larger_circuits_are_rejected() -> Result<()> {
    let mut big = Circuit::new();
    let mut last = big.input("a", 1)?;
    for _ in 0..8 {
        last = big.not(last)?;
    }

    let mut small = Circuit::new();
    let r = small.register("r", 1)?;
    r.drive_next(&mut small, r)?;
    assert_eq!(small.check(last).err(), Some(CircuitError::ForeignSignal));
    assert_eq!(small.not(last).err(), Some(CircuitError::ForeignSignal));

    let sim = Simulator::new(&small, &[])?;
    assert_eq!(sim.read(last).err(), Some(CircuitError::ForeignSignal));
    Ok(())
}
