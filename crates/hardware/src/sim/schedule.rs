//! Evaluation ordering.
//!
//! Combinational nodes are evaluated in a topological order computed once per
//! simulator. The order is a depth-first post-order from the requested roots,
//! so every operand is evaluated before the nodes that read it. Register reads
//! have no operands, so feedback through a register never shows up as a loop.
//! Reaching a node that is still on the depth-first stack means the graph
//! holds a combinational loop.

use crate::circuit::{Circuit, SignalId};
use crate::common::{CircuitError, Result};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Topological order of every node reachable from `roots`.
///
/// Fails with [`CircuitError::CombinationalCycle`] when a loop is found; the
/// reported path lists each signal followed by one of its operands, and the
/// last signal reads the first.
pub fn order(circuit: &Circuit, roots: impl IntoIterator<Item = SignalId>) -> Result<Vec<SignalId>> {
    let nodes = circuit.nodes();
    let mut marks = vec![Mark::Unvisited; nodes.len()];
    let mut order = Vec::with_capacity(nodes.len());
    // (node, index of the next operand to visit)
    let mut stack: Vec<(SignalId, usize)> = Vec::new();

    for root in roots {
        if marks[root.index()] != Mark::Unvisited {
            continue;
        }
        marks[root.index()] = Mark::Active;
        stack.push((root, 0));

        while let Some(top) = stack.last_mut() {
            let (id, pos) = *top;
            top.1 += 1;
            match nodes[id.index()].node().operands().nth(pos) {
                None => {
                    marks[id.index()] = Mark::Done;
                    order.push(id);
                    let _ = stack.pop();
                }
                Some(operand) => match marks[operand.index()] {
                    Mark::Done => {}
                    Mark::Unvisited => {
                        marks[operand.index()] = Mark::Active;
                        stack.push((operand, 0));
                    }
                    Mark::Active => {
                        let start = stack
                            .iter()
                            .position(|&(entry, _)| entry == operand)
                            .unwrap_or(0);
                        let path = stack[start..].iter().map(|&(entry, _)| entry).collect();
                        return Err(CircuitError::CombinationalCycle { path });
                    }
                },
            }
        }
    }
    Ok(order)
}
