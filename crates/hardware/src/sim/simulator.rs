//! Cycle-accurate simulator.
//!
//! A [`Simulator`] borrows a finished [`Circuit`] and owns all run-time state:
//! register values, the most recent combinational values, the trace, and
//! statistics. Each cycle runs in four phases:
//! 1. **Inputs:** Caller-supplied input values are applied.
//! 2. **Evaluate:** Every node is computed in topological order. Register reads
//!    return the value held at the start of the cycle, however often they are read.
//! 3. **Record:** Monitored values are captured into a snapshot and passed to observers.
//! 4. **Commit:** Every register's next value is written at once. The new values go to a
//!    separate buffer that is swapped in, so no evaluation can see a value committed in
//!    the same cycle.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{info, trace, warn};

use super::observer::CycleObserver;
use super::schedule;
use super::trace::{Snapshot, Trace};
use crate::circuit::{Circuit, Entity, Node, SignalId};
use crate::common::width::{check_value, mask};
use crate::common::{CircuitError, FinalizeError, Result};
use crate::config::SimulationConfig;
use crate::stats::SimStats;

/// Runs a circuit cycle by cycle and records monitored values.
pub struct Simulator<'c> {
    circuit: &'c Circuit,
    order: Vec<SignalId>,
    values: Vec<u128>,
    state: Vec<u128>,
    next_state: Vec<u128>,
    monitors: Vec<(String, Entity)>,
    trace: Trace,
    record_trace: bool,
    observers: Vec<Box<dyn CycleObserver>>,
    cycle: u64,
    evaluated: bool,
    /// Work counters for this run.
    pub stats: SimStats,
}

impl fmt::Debug for Simulator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulator")
            .field("circuit", &self.circuit.id())
            .field("cycle", &self.cycle)
            .field("state", &self.state)
            .field("monitors", &self.monitors)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl<'c> Simulator<'c> {
    /// Validates `circuit` and prepares a simulation that records `monitors`.
    ///
    /// Fails with [`CircuitError::GraphNotFinalized`] if a register or wire is
    /// undriven, with [`CircuitError::CombinationalCycle`] if the graph has a
    /// loop that no register breaks, and with [`CircuitError::ForeignSignal`]
    /// if a monitor belongs to another circuit.
    pub fn new(circuit: &'c Circuit, monitors: &[Entity]) -> Result<Self> {
        for decl in circuit.registers() {
            if decl.next().is_none() {
                return Err(FinalizeError::UndrivenRegister(decl.name().to_string()).into());
            }
        }
        for (idx, entry) in circuit.nodes().iter().enumerate() {
            if *entry.node() == Node::Wire(None) {
                return Err(FinalizeError::UndrivenWire(SignalId(idx)).into());
            }
        }
        let order = schedule::order(circuit, (0..circuit.nodes().len()).map(SignalId))?;

        let mut named: Vec<(String, Entity)> = Vec::with_capacity(monitors.len());
        for &entity in monitors {
            let entity = circuit.check_entity(entity)?;
            let name = circuit.entity_name(entity);
            if named.iter().any(|(existing, _)| *existing == name) {
                warn!(name = name.as_str(), "monitor listed twice; keeping the first");
                continue;
            }
            named.push((name, entity));
        }

        let state: Vec<u128> = circuit.registers().iter().map(|r| r.reset_value()).collect();
        info!(
            nodes = circuit.nodes().len(),
            registers = state.len(),
            monitors = named.len(),
            "simulator ready"
        );
        Ok(Self {
            circuit,
            order,
            values: vec![0; circuit.nodes().len()],
            next_state: state.clone(),
            state,
            trace: Trace::new(named.iter().map(|(name, _)| name.clone()).collect()),
            monitors: named,
            record_trace: true,
            observers: Vec::new(),
            cycle: 0,
            evaluated: false,
            stats: SimStats::default(),
        })
    }

    /// Like [`Simulator::new`], resolving monitors by name.
    pub fn with_monitor_names(circuit: &'c Circuit, names: &[&str]) -> Result<Self> {
        let monitors = names
            .iter()
            .map(|name| circuit.lookup(name))
            .collect::<Result<Vec<_>>>()?;
        Self::new(circuit, &monitors)
    }

    /// Builds a simulator from configuration.
    ///
    /// An empty monitor list records every named entity of the circuit.
    pub fn from_config(circuit: &'c Circuit, config: &SimulationConfig) -> Result<Self> {
        let monitors: Vec<Entity> = if config.monitors.is_empty() {
            circuit.named_entities().into_iter().map(|(_, e)| e).collect()
        } else {
            config
                .monitors
                .iter()
                .map(|name| circuit.lookup(name))
                .collect::<Result<_>>()?
        };
        let mut sim = Self::new(circuit, &monitors)?;
        sim.record_trace = config.record_trace;
        Ok(sim)
    }

    /// Registers an observer called once per simulated cycle.
    pub fn attach_observer(&mut self, observer: Box<dyn CycleObserver>) {
        self.observers.push(observer);
    }

    /// The circuit being simulated.
    pub const fn circuit(&self) -> &'c Circuit {
        self.circuit
    }

    /// Number of cycles simulated so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// The recorded trace.
    pub const fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Runs `cycles` cycles on a circuit without inputs.
    ///
    /// Fails with [`CircuitError::MissingInput`] if the circuit has inputs;
    /// use [`Simulator::step_with`] for those.
    pub fn step(&mut self, cycles: u64) -> Result<()> {
        for _ in 0..cycles {
            self.step_with(std::iter::empty())?;
        }
        Ok(())
    }

    /// Runs one cycle with the given input values.
    ///
    /// Every input of the circuit needs exactly one value. Values are checked against
    /// the input width before anything is evaluated, so a rejected step
    /// leaves the simulation untouched.
    pub fn step_with<'a>(&mut self, inputs: impl IntoIterator<Item = (&'a str, u128)>) -> Result<()> {
        let mut given: BTreeMap<&str, u128> = BTreeMap::new();
        for (name, value) in inputs {
            if given.insert(name, value).is_some() {
                return Err(CircuitError::DuplicateName(name.to_string()));
            }
        }

        let mut applied = Vec::new();
        for (name, signal) in self.circuit.inputs() {
            let value = given
                .remove(name)
                .ok_or_else(|| CircuitError::MissingInput(name.to_string()))?;
            applied.push((signal.id(), check_value(value, signal.width())?));
        }
        if let Some(name) = given.keys().next() {
            return Err(CircuitError::UnknownName((*name).to_string()));
        }

        for &(id, value) in &applied {
            self.values[id.index()] = value;
        }
        self.stats.input_updates += applied.len() as u64;
        self.cycle_once();
        Ok(())
    }

    fn cycle_once(&mut self) {
        let circuit = self.circuit;

        for &id in &self.order {
            let entry = circuit.node(id);
            let values = &self.values;
            let value = match *entry.node() {
                Node::Const(value) => value,
                Node::Input => values[id.index()],
                Node::RegisterRead(reg) => self.state[reg.index()],
                Node::Wire(driver) => driver.map_or(0, |d| values[d.index()]),
                Node::Not(a) => !values[a.index()] & mask(entry.width()),
                Node::And(a, b) => values[a.index()] & values[b.index()],
                Node::Or(a, b) => values[a.index()] | values[b.index()],
                Node::Xor(a, b) => values[a.index()] ^ values[b.index()],
                Node::Select { source, low } => (values[source.index()] >> low) & mask(entry.width()),
                Node::Concat { high, low, shift } => (values[high.index()] << shift) | values[low.index()],
                Node::ZeroExtend(source) => values[source.index()],
            };
            self.values[id.index()] = value;
        }
        self.evaluated = true;

        let snapshot = Snapshot {
            cycle: self.cycle,
            values: self
                .monitors
                .iter()
                .map(|(name, entity)| (name.clone(), self.observe(*entity)))
                .collect(),
        };
        for observer in &mut self.observers {
            observer.on_cycle(&snapshot);
        }
        if self.record_trace {
            self.trace.record(snapshot);
        }

        for (slot, decl) in self.next_state.iter_mut().zip(circuit.registers()) {
            if let Some(next) = decl.next() {
                *slot = self.values[next.index()];
            }
        }
        std::mem::swap(&mut self.state, &mut self.next_state);

        let registers = self.state.len() as u64;
        self.stats.cycles += 1;
        self.stats.node_evaluations += self.order.len() as u64;
        self.stats.register_commits += registers;
        trace!(cycle = self.cycle, state = ?self.state, "committed cycle");
        self.cycle += 1;
    }

    /// Value of an entity within the current cycle's evaluation.
    fn observe(&self, entity: Entity) -> u128 {
        match entity {
            Entity::Register(reg) => self.state[reg.id().index()],
            Entity::Signal(signal) => self.values[signal.id().index()],
        }
    }

    /// Current value of a register or signal.
    ///
    /// Registers (and signals reading them) report the value committed at
    /// the last cycle boundary, or their reset value before the first step.
    /// Other signals report the value computed in the most recent cycle;
    /// reading one before any cycle has run fails with
    /// [`CircuitError::NotEvaluated`], except for constants.
    pub fn read(&self, entity: impl Into<Entity>) -> Result<u128> {
        let entity = self.circuit.check_entity(entity.into())?;
        match entity {
            Entity::Register(reg) => Ok(self.state[reg.id().index()]),
            Entity::Signal(signal) => match *self.circuit.node(signal.id()).node() {
                Node::RegisterRead(reg) => Ok(self.state[reg.index()]),
                Node::Const(value) => Ok(value),
                _ if self.evaluated => Ok(self.values[signal.id().index()]),
                _ => Err(CircuitError::NotEvaluated(self.circuit.entity_name(entity))),
            },
        }
    }

    /// Current value of the register, input, or named signal called `name`.
    pub fn inspect(&self, name: &str) -> Result<u128> {
        self.read(self.circuit.lookup(name)?)
    }

    /// Returns every register to its reset value and clears the trace and statistics.
    pub fn reset(&mut self) {
        for (slot, decl) in self.state.iter_mut().zip(self.circuit.registers()) {
            *slot = decl.reset_value();
        }
        self.values.fill(0);
        self.trace.clear();
        self.stats = SimStats::default();
        self.cycle = 0;
        self.evaluated = false;
    }
}
