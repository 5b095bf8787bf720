//! Logic nets: the nodes of the netlist graph.

use crate::ids::{NetId, WireId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The operation a net performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    /// Plain connection (`dest <<= src`).
    Wire,
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Bitwise NOT.
    Not,
    /// Addition with a carry bit.
    Add,
    /// Subtraction with a borrow bit.
    Sub,
    /// Multiplication.
    Mul,
    /// Unsigned less-than.
    Lt,
    /// Unsigned greater-than.
    Gt,
    /// Equality.
    Eq,
    /// Bit selection; the parameter lists the selected source bits.
    Select,
    /// Concatenation, most significant argument first.
    Concat,
    /// Clocked update of a register from its next value.
    Register,
}

impl Op {
    /// The one-character code used when printing nets.
    pub fn code(self) -> char {
        match self {
            Op::Wire => 'w',
            Op::And => '&',
            Op::Or => '|',
            Op::Xor => '^',
            Op::Not => '~',
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Lt => '<',
            Op::Gt => '>',
            Op::Eq => '=',
            Op::Select => 's',
            Op::Concat => 'c',
            Op::Register => 'r',
        }
    }

    /// Returns `true` for ops whose output changes only at a clock edge.
    pub fn is_sequential(self) -> bool {
        self == Op::Register
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One operation in the netlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicNet {
    /// The ID of this net within its block.
    pub id: NetId,
    /// The operation.
    pub op: Op,
    /// Operation-specific immediate; the selected bit indices for [`Op::Select`].
    pub param: Option<Vec<u32>>,
    /// Input wires, in operand order.
    pub args: Vec<WireId>,
    /// Output wires. Every op here has exactly one.
    pub dests: Vec<WireId>,
}

impl LogicNet {
    /// The single destination wire.
    pub fn dest(&self) -> WireId {
        self.dests[0]
    }
}
