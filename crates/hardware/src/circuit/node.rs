//! Graph nodes.
//!
//! Every signal is produced by exactly one [`Node`]. Leaves (constants,
//! inputs, register reads) have no operands; every other variant is a pure
//! function of its operands, recomputed each cycle.

use super::register::RegisterId;
use super::signal::SignalId;

/// The producer of a signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Fixed value.
    Const(u128),
    /// Value supplied by the caller on every step.
    Input,
    /// Start-of-cycle value of a register.
    RegisterRead(RegisterId),
    /// Forward-declared signal; `None` until driven.
    Wire(Option<SignalId>),
    /// Bitwise complement.
    Not(SignalId),
    /// Bitwise AND of two equal-width signals.
    And(SignalId, SignalId),
    /// Bitwise OR of two equal-width signals.
    Or(SignalId, SignalId),
    /// Bitwise XOR of two equal-width signals.
    Xor(SignalId, SignalId),
    /// Contiguous bits of `source` starting at bit `low`; the node width is the range length.
    Select {
        /// Signal bits are taken from.
        source: SignalId,
        /// Lowest selected bit.
        low: u32,
    },
    /// `high` placed above `low`; `shift` is the width of `low`.
    Concat {
        /// Most significant part.
        high: SignalId,
        /// Least significant part.
        low: SignalId,
        /// Width of `low`.
        shift: u32,
    },
    /// `source` with zero high bits added up to the node width.
    ZeroExtend(SignalId),
}

impl Node {
    /// Signals this node reads during combinational evaluation.
    ///
    /// Register reads report no operands: the register output is a cycle
    /// input, which is what breaks feedback loops through registers.
    pub fn operands(&self) -> impl Iterator<Item = SignalId> {
        let pair = match *self {
            Self::Const(_) | Self::Input | Self::RegisterRead(_) | Self::Wire(None) => [None, None],
            Self::Wire(Some(a)) | Self::Not(a) | Self::ZeroExtend(a) => [Some(a), None],
            Self::Select { source, .. } => [Some(source), None],
            Self::And(a, b) | Self::Or(a, b) | Self::Xor(a, b) => [Some(a), Some(b)],
            Self::Concat { high, low, .. } => [Some(high), Some(low)],
        };
        pair.into_iter().flatten()
    }

    /// Short mnemonic, used in logs and text dumps.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            Self::Const(_) => "const",
            Self::Input => "input",
            Self::RegisterRead(_) => "reg",
            Self::Wire(_) => "wire",
            Self::Not(_) => "not",
            Self::And(..) => "and",
            Self::Or(..) => "or",
            Self::Xor(..) => "xor",
            Self::Select { .. } => "select",
            Self::Concat { .. } => "concat",
            Self::ZeroExtend(_) => "zext",
        }
    }
}

/// A node together with its width and optional name.
#[derive(Debug, Clone)]
pub struct NodeEntry {
    pub(crate) node: Node,
    pub(crate) width: u32,
    pub(crate) name: Option<String>,
}

impl NodeEntry {
    /// The producing node.
    pub const fn node(&self) -> &Node {
        &self.node
    }

    /// Width of the produced signal.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Name given to the signal, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
