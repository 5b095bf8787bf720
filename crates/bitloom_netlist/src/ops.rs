//! Width inference and operator emission.
//!
//! Binary operators coerce both operands, extend the narrower one by its
//! own rule and emit a single net into a fresh result wire:
//!
//! | op                | result width            |
//! |-------------------|-------------------------|
//! | `and` `or` `xor`  | `max(wa, wb)`           |
//! | `add` `sub`       | `max(wa, wb) + 1`       |
//! | `mul`             | `2 * max(wa, wb)`       |
//! | `lt` `gt` `eq`    | `1`                     |
//!
//! `mul` doubles the equalized width, not the sum of the operand widths.

use crate::block::Block;
use crate::coerce::Operand;
use crate::error::{NetlistError, NetlistResult};
use crate::ids::WireId;
use crate::net::Op;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The binary operations the width engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Bitwise AND.
    And,
    /// Bitwise OR.
    Or,
    /// Bitwise XOR.
    Xor,
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Less-than.
    Lt,
    /// Greater-than.
    Gt,
    /// Equality.
    Eq,
}

impl BinaryOp {
    /// The net op emitted for this operation.
    pub fn op(self) -> Op {
        match self {
            BinaryOp::And => Op::And,
            BinaryOp::Or => Op::Or,
            BinaryOp::Xor => Op::Xor,
            BinaryOp::Add => Op::Add,
            BinaryOp::Sub => Op::Sub,
            BinaryOp::Mul => Op::Mul,
            BinaryOp::Lt => Op::Lt,
            BinaryOp::Gt => Op::Gt,
            BinaryOp::Eq => Op::Eq,
        }
    }

    /// Result width given the equalized operand width, or `None` if it
    /// does not fit in a `u32`.
    pub fn result_width(self, width: u32) -> Option<u32> {
        match self {
            BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => Some(width),
            BinaryOp::Add | BinaryOp::Sub => width.checked_add(1),
            BinaryOp::Mul => width.checked_mul(2),
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Eq => Some(1),
        }
    }
}

impl Block {
    /// Emits `a <op> b` and returns the result wire.
    ///
    /// Both operands are checked before either is materialized, so a
    /// rejected call adds no wires.
    pub fn logic_op(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        op: BinaryOp,
    ) -> NetlistResult<WireId> {
        let (a, b) = (a.into(), b.into());
        let equalized = self.operand_width(&a)?.max(self.operand_width(&b)?);
        let width = op
            .result_width(equalized)
            .ok_or_else(|| NetlistError::WidthOverflow {
                name: self.operand_label(&a),
            })?;
        let (a, b) = self.coerce_pair(a, b)?;
        let (a, b) = self.match_widths(a, b)?;
        trace!(?op, a = self.name(a), b = self.name(b), width, "binary op");
        let dest = self.temp_wire(width);
        self.add_net(op.op(), None, vec![a, b], vec![dest]);
        Ok(dest)
    }

    fn coerce_pair(&mut self, a: Operand, b: Operand) -> NetlistResult<(WireId, WireId)> {
        self.operand_width(&a)?;
        self.operand_width(&b)?;
        Ok((self.as_wires(a, None)?, self.as_wires(b, None)?))
    }

    /// Extends the narrower of two wires to the width of the wider one.
    pub fn match_widths(&mut self, a: WireId, b: WireId) -> NetlistResult<(WireId, WireId)> {
        let wa = self.width(a)?;
        let wb = self.width(b)?;
        let target = wa.max(wb);
        Ok((self.extended(a, target)?, self.extended(b, target)?))
    }

    /// Bitwise AND.
    pub fn and(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        self.logic_op(a, b, BinaryOp::And)
    }

    /// Bitwise OR.
    pub fn or(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        self.logic_op(a, b, BinaryOp::Or)
    }

    /// Bitwise XOR.
    pub fn xor(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        self.logic_op(a, b, BinaryOp::Xor)
    }

    /// Addition, one bit wider than the wider operand.
    pub fn add(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        self.logic_op(a, b, BinaryOp::Add)
    }

    /// Subtraction, one bit wider than the wider operand.
    pub fn sub(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        self.logic_op(a, b, BinaryOp::Sub)
    }

    /// Multiplication, twice as wide as the wider operand.
    pub fn mul(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        self.logic_op(a, b, BinaryOp::Mul)
    }

    /// `a < b`, one bit.
    pub fn lt(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        self.logic_op(a, b, BinaryOp::Lt)
    }

    /// `a > b`, one bit.
    pub fn gt(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        self.logic_op(a, b, BinaryOp::Gt)
    }

    /// `a == b`, one bit.
    pub fn eq(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        self.logic_op(a, b, BinaryOp::Eq)
    }

    /// `a <= b`, built as `(a < b) | (a == b)`.
    pub fn le(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        let (a, b) = self.coerce_pair(a.into(), b.into())?;
        let lt = self.lt(a, b)?;
        let eq = self.eq(a, b)?;
        self.or(lt, eq)
    }

    /// `a >= b`, built as `(a > b) | (a == b)`.
    pub fn ge(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        let (a, b) = self.coerce_pair(a.into(), b.into())?;
        let gt = self.gt(a, b)?;
        let eq = self.eq(a, b)?;
        self.or(gt, eq)
    }

    /// `a != b`, built as `~(a == b)`.
    pub fn ne(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> NetlistResult<WireId> {
        let eq = self.eq(a, b)?;
        self.invert(eq)
    }

    /// Bitwise NOT, same width as the operand.
    pub fn invert(&mut self, a: impl Into<Operand>) -> NetlistResult<WireId> {
        let a = a.into();
        let width = self.operand_width(&a)?;
        let a = self.as_wires(a, None)?;
        let dest = self.temp_wire(width);
        self.add_net(Op::Not, None, vec![a], vec![dest]);
        Ok(dest)
    }
}
