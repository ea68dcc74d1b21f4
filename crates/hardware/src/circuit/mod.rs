//! Circuit graph construction.
//!
//! A [`Circuit`] is an explicit graph-builder context owned by the caller. It
//! performs:
//! 1. **Leaves:** Constants, caller-driven inputs, register reads, and forward-declared wires.
//! 2. **Combinational nodes:** NOT/AND/OR/XOR, bit-select, concatenation, and zero-extension.
//! 3. **Registers:** Named stateful nodes with a once-assigned next-value signal.
//! 4. **Naming:** A single namespace shared by registers, inputs, and named signals, used to
//!    pick monitors and inputs at simulation time.
//!
//! Every check runs before a node is pushed, so a failed call leaves the
//! graph unchanged. Composite builders such as the adders roll back any
//! nodes they pushed before failing. Names of the form `n<digits>` are
//! reserved for anonymous signals. Building a fresh `Circuit` is the equivalent of resetting
//! the working graph.

mod bitwidth;
/// Graph nodes.
pub mod node;
/// Register handles and declarations.
pub mod register;
/// Signal handles and operands.
pub mod signal;

use std::collections::HashMap;

use tracing::debug;

use crate::common::width::{check_value, check_width, min_width};
use crate::common::{CircuitError, Result};
use crate::sim::schedule;

pub use node::{Node, NodeEntry};
pub use register::{Register, RegisterDecl, RegisterId};
pub use signal::{CircuitId, Operand, Signal, SignalId};

/// Something whose value can be read or monitored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A register; its value is the register's current state.
    Register(Register),
    /// Any signal; its value is the one computed in the most recent cycle.
    Signal(Signal),
}

impl From<Register> for Entity {
    fn from(reg: Register) -> Self {
        Self::Register(reg)
    }
}

impl From<Signal> for Entity {
    fn from(signal: Signal) -> Self {
        Self::Signal(signal)
    }
}

/// An explicit circuit graph under construction.
#[derive(Debug)]
pub struct Circuit {
    id: CircuitId,
    nodes: Vec<NodeEntry>,
    registers: Vec<RegisterDecl>,
    names: HashMap<String, Entity>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    /// Starts an empty graph.
    pub fn new() -> Self {
        Self {
            id: CircuitId::fresh(),
            nodes: Vec::new(),
            registers: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Identity of this circuit; handles from other circuits are rejected.
    pub const fn id(&self) -> CircuitId {
        self.id
    }

    /// All nodes, indexed by [`SignalId`].
    pub fn nodes(&self) -> &[NodeEntry] {
        &self.nodes
    }

    /// All register declarations, indexed by [`RegisterId`].
    pub fn registers(&self) -> &[RegisterDecl] {
        &self.registers
    }

    /// The node producing `id`.
    pub(crate) fn node(&self, id: SignalId) -> &NodeEntry {
        &self.nodes[id.0]
    }

    /// Rebuilds a handle for a node of this circuit.
    pub(crate) fn signal(&self, id: SignalId) -> Signal {
        Signal {
            id,
            width: self.nodes[id.0].width,
            circuit: self.id,
        }
    }

    /// Iterates over every input node as `(name, signal)`.
    pub fn inputs(&self) -> impl Iterator<Item = (&str, Signal)> {
        self.nodes.iter().enumerate().filter_map(|(idx, entry)| match entry.node {
            Node::Input => entry
                .name
                .as_deref()
                .map(|name| (name, self.signal(SignalId(idx)))),
            _ => None,
        })
    }

    /// Finds a register, input, or named signal by name.
    pub fn lookup(&self, name: &str) -> Result<Entity> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| CircuitError::UnknownName(name.to_string()))
    }

    /// Every name in the circuit with the entity it refers to, sorted by name.
    pub fn named_entities(&self) -> Vec<(String, Entity)> {
        let mut named: Vec<(String, Entity)> = self
            .names
            .iter()
            .map(|(name, &entity)| (name.clone(), entity))
            .collect();
        named.sort_by(|a, b| a.0.cmp(&b.0));
        named
    }

    /// Display name of an entity: its given name, or `n<index>` for anonymous signals.
    pub fn entity_name(&self, entity: Entity) -> String {
        match entity {
            Entity::Register(reg) => self.registers[reg.id.0].name.clone(),
            Entity::Signal(signal) => self.nodes[signal.id.0]
                .name
                .clone()
                .unwrap_or_else(|| signal.id.to_string()),
        }
    }

    /// Fails with [`CircuitError::ForeignSignal`] unless `signal` was created here.
    pub fn check(&self, signal: Signal) -> Result<Signal> {
        if signal.circuit == self.id && signal.id.0 < self.nodes.len() {
            Ok(signal)
        } else {
            Err(CircuitError::ForeignSignal)
        }
    }

    /// Same as [`Circuit::check`] for an entity.
    pub fn check_entity(&self, entity: Entity) -> Result<Entity> {
        match entity {
            Entity::Register(reg) => self.check(reg.output).map(|_| entity),
            Entity::Signal(signal) => self.check(signal).map(|_| entity),
        }
    }

    /// Names of the form `n<digits>` are reserved for anonymous signals.
    fn ensure_name_free(&self, name: &str) -> Result<()> {
        if self.names.contains_key(name) || is_anonymous_name(name) {
            Err(CircuitError::DuplicateName(name.to_string()))
        } else {
            Ok(())
        }
    }

    /// Runs `build`, dropping every node it pushed if it fails.
    ///
    /// `build` may only push nodes; names and registers are not rolled back.
    pub(crate) fn with_rollback<T>(&mut self, build: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let mark = self.nodes.len();
        let result = build(self);
        if result.is_err() {
            self.nodes.truncate(mark);
        }
        result
    }

    fn push(&mut self, node: Node, width: u32) -> Signal {
        let id = SignalId(self.nodes.len());
        self.nodes.push(NodeEntry {
            node,
            width,
            name: None,
        });
        Signal {
            id,
            width,
            circuit: self.id,
        }
    }

    /// Resolves an operand, turning bare values into minimal-width constants.
    pub fn operand(&mut self, op: impl Into<Operand>) -> Result<Signal> {
        match op.into() {
            Operand::Signal(signal) => self.check(signal),
            Operand::Value(value) => self.constant(value, min_width(value)),
        }
    }

    /// Resolves an operand that must have exactly `width` bits.
    ///
    /// Bare values become constants of that width.
    pub fn operand_with_width(
        &mut self,
        op: impl Into<Operand>,
        width: u32,
        op_name: &'static str,
    ) -> Result<Signal> {
        let signal = match op.into() {
            Operand::Signal(signal) => self.check(signal)?,
            Operand::Value(value) => self.constant(value, width)?,
        };
        expect_width(op_name, width, signal)
    }

    /// A constant of the given width.
    pub fn constant(&mut self, value: u128, width: u32) -> Result<Signal> {
        let width = check_width(width)?;
        let value = check_value(value, width)?;
        Ok(self.push(Node::Const(value), width))
    }

    /// A named input whose value is supplied on every simulation step.
    pub fn input(&mut self, name: &str, width: u32) -> Result<Signal> {
        let width = check_width(width)?;
        self.ensure_name_free(name)?;
        let signal = self.push(Node::Input, width);
        self.nodes[signal.id.0].name = Some(name.to_string());
        let _ = self.names.insert(name.to_string(), Entity::Signal(signal));
        Ok(signal)
    }

    /// A forward-declared signal, driven later with [`Circuit::drive_wire`].
    pub fn wire(&mut self, width: u32) -> Result<Signal> {
        let width = check_width(width)?;
        Ok(self.push(Node::Wire(None), width))
    }

    /// Drives a wire created with [`Circuit::wire`].
    ///
    /// Any other kind of signal already has a producer and is reported as
    /// [`CircuitError::AlreadyDriven`].
    pub fn drive_wire(&mut self, wire: Signal, driver: Signal) -> Result<()> {
        let wire = self.check(wire)?;
        let driver = self.check(driver)?;
        if self.nodes[wire.id.0].node != Node::Wire(None) {
            return Err(CircuitError::AlreadyDriven(self.entity_name(Entity::Signal(wire))));
        }
        let driver = expect_width("drive_wire", wire.width, driver)?;
        self.nodes[wire.id.0].node = Node::Wire(Some(driver.id));
        Ok(())
    }

    /// Declares a register that resets to zero.
    pub fn register(&mut self, name: &str, width: u32) -> Result<Register> {
        self.register_with_reset(name, width, 0)
    }

    /// Declares a register with an explicit reset value.
    pub fn register_with_reset(&mut self, name: &str, width: u32, reset_value: u128) -> Result<Register> {
        let width = check_width(width)?;
        let reset_value = check_value(reset_value, width)?;
        self.ensure_name_free(name)?;

        let id = RegisterId(self.registers.len());
        let output = self.push(Node::RegisterRead(id), width);
        self.nodes[output.id.0].name = Some(name.to_string());
        self.registers.push(RegisterDecl {
            name: name.to_string(),
            reset_value,
            output: output.id,
            next: None,
        });
        let reg = Register { id, output };
        let _ = self.names.insert(name.to_string(), Entity::Register(reg));
        debug!(name, width, reset_value = %reset_value, "declared register");
        Ok(reg)
    }

    /// Assigns a register's next-value signal.
    ///
    /// The signal must have the register's width; a bare value becomes a
    /// constant of that width. Fails with [`CircuitError::AlreadyDriven`] on
    /// a second assignment.
    pub fn drive_next(&mut self, reg: Register, next: impl Into<Operand>) -> Result<()> {
        let _ = self.check(reg.output)?;
        let decl = &self.registers[reg.id.0];
        if decl.next.is_some() {
            return Err(CircuitError::AlreadyDriven(decl.name.clone()));
        }
        let next = self.operand_with_width(next, reg.width(), "drive_next")?;
        self.registers[reg.id.0].next = Some(next.id);
        Ok(())
    }

    /// Gives a signal a name so it can be monitored and inspected.
    ///
    /// Naming an already named signal adds an alias; the first name stays
    /// the one shown in traces.
    pub fn name(&mut self, signal: Signal, name: &str) -> Result<Signal> {
        let signal = self.check(signal)?;
        self.ensure_name_free(name)?;
        let entry = &mut self.nodes[signal.id.0];
        if entry.name.is_none() {
            entry.name = Some(name.to_string());
        }
        let _ = self.names.insert(name.to_string(), Entity::Signal(signal));
        Ok(signal)
    }

    /// Bitwise complement.
    pub fn not(&mut self, a: Signal) -> Result<Signal> {
        let a = self.check(a)?;
        Ok(self.push(Node::Not(a.id), a.width))
    }

    /// Bitwise AND; both operands must have the same width.
    pub fn and(&mut self, a: Signal, b: Signal) -> Result<Signal> {
        let (a, b) = self.same_width("and", a, b)?;
        Ok(self.push(Node::And(a.id, b.id), a.width))
    }

    /// Bitwise OR; both operands must have the same width.
    pub fn or(&mut self, a: Signal, b: Signal) -> Result<Signal> {
        let (a, b) = self.same_width("or", a, b)?;
        Ok(self.push(Node::Or(a.id, b.id), a.width))
    }

    /// Bitwise XOR; both operands must have the same width.
    pub fn xor(&mut self, a: Signal, b: Signal) -> Result<Signal> {
        let (a, b) = self.same_width("xor", a, b)?;
        Ok(self.push(Node::Xor(a.id, b.id), a.width))
    }

    /// Bits `low .. low + width` of `source`.
    ///
    /// Selecting the whole signal returns it unchanged.
    pub fn select(&mut self, source: Signal, low: u32, width: u32) -> Result<Signal> {
        let source = self.check(source)?;
        let width = check_width(width)?;
        if low.checked_add(width).is_none_or(|top| top > source.width) {
            return Err(CircuitError::BitRange {
                low,
                width,
                source_width: source.width,
            });
        }
        if low == 0 && width == source.width {
            return Ok(source);
        }
        Ok(self.push(Node::Select { source: source.id, low }, width))
    }

    /// Single bit `index` of `source`.
    pub fn bit(&mut self, source: Signal, index: u32) -> Result<Signal> {
        self.select(source, index, 1)
    }

    /// `high` placed above `low`.
    pub fn concat(&mut self, high: Signal, low: Signal) -> Result<Signal> {
        let high = self.check(high)?;
        let low = self.check(low)?;
        let width = check_width(high.width + low.width)?;
        Ok(self.push(
            Node::Concat {
                high: high.id,
                low: low.id,
                shift: low.width,
            },
            width,
        ))
    }

    /// Zero-extends `source` to `width` bits.
    ///
    /// Extending to the current width returns the signal unchanged; a
    /// narrower target is a [`CircuitError::WidthMismatch`].
    pub fn zero_extend(&mut self, source: Signal, width: u32) -> Result<Signal> {
        let source = self.check(source)?;
        let width = check_width(width)?;
        if width < source.width {
            return Err(CircuitError::WidthMismatch {
                op: "zero_extend",
                expected: width,
                found: source.width,
            });
        }
        if width == source.width {
            return Ok(source);
        }
        Ok(self.push(Node::ZeroExtend(source.id), width))
    }

    /// Finds a combinational loop, if any, anywhere in the graph.
    ///
    /// Loops through registers are not combinational and are never reported.
    /// Undriven wires are treated as leaves.
    pub fn find_combinational_loop(&self) -> Option<Vec<SignalId>> {
        match schedule::order(self, (0..self.nodes.len()).map(SignalId)) {
            Err(CircuitError::CombinationalCycle { path }) => Some(path),
            _ => None,
        }
    }

    fn same_width(&self, op: &'static str, a: Signal, b: Signal) -> Result<(Signal, Signal)> {
        let a = self.check(a)?;
        let b = expect_width(op, a.width, self.check(b)?)?;
        Ok((a, b))
    }
}

fn is_anonymous_name(name: &str) -> bool {
    name.strip_prefix('n')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

pub(crate) const fn expect_width(op: &'static str, expected: u32, signal: Signal) -> Result<Signal> {
    if signal.width == expected {
        Ok(signal)
    } else {
        Err(CircuitError::WidthMismatch {
            op,
            expected,
            found: signal.width,
        })
    }
}
