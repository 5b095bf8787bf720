//! Operand coercion and concatenation.
//!
//! Every operator accepts anything convertible into an [`Operand`]: an
//! existing wire, an integer, or a sized literal. [`Block::as_wires`] turns
//! such a value into a wire, optionally of a required width.

use crate::block::Block;
use crate::error::{NetlistError, NetlistResult};
use crate::ids::WireId;
use crate::literal::{parse_const, ConstInput};
use crate::net::Op;
use crate::register::NextRef;
use crate::wire::{Role, Signedness};
use num_bigint::{BigInt, BigUint};

/// A value that can appear on either side of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// An existing wire.
    Wire(WireId),
    /// A constant to be materialized as an unsigned `Const` wire.
    Const(ConstInput),
    /// A register's next-value proxy. Never valid as a value.
    Next(NextRef),
}

impl From<WireId> for Operand {
    fn from(id: WireId) -> Self {
        Operand::Wire(id)
    }
}

impl From<&WireId> for Operand {
    fn from(id: &WireId) -> Self {
        Operand::Wire(*id)
    }
}

impl From<NextRef> for Operand {
    fn from(next: NextRef) -> Self {
        Operand::Next(next)
    }
}

impl From<ConstInput> for Operand {
    fn from(c: ConstInput) -> Self {
        Operand::Const(c)
    }
}

macro_rules! operand_from_const {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(v: $t) -> Self {
                    Operand::Const(ConstInput::from(v))
                }
            }
        )*
    };
}

operand_from_const!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, BigInt, BigUint, &str, String
);

impl Block {
    /// Converts `value` into a wire.
    ///
    /// Wires pass through unchanged when `bitwidth` is `None`. With a
    /// `bitwidth`, a narrower wire is extended by its own rule and a wider
    /// one is a shrink error. Integers become a `Const` of exactly
    /// `bitwidth` bits, or of minimal width when none is given.
    pub fn as_wires(
        &mut self,
        value: impl Into<Operand>,
        bitwidth: Option<u32>,
    ) -> NetlistResult<WireId> {
        match value.into() {
            Operand::Wire(id) => {
                self.check_readable(id)?;
                self.fit_width(id, bitwidth)
            }
            Operand::Const(input @ ConstInput::Int(_)) => {
                self.add_const(&input, bitwidth, Signedness::Unsigned)
            }
            Operand::Const(ConstInput::Text(text)) => {
                let parsed = parse_const(&ConstInput::Text(text.clone()), None)?;
                if let Some(target) = bitwidth.filter(|t| *t < parsed.bitwidth) {
                    return Err(NetlistError::ShrinkExtension {
                        name: text,
                        from: parsed.bitwidth,
                        to: target,
                    });
                }
                let k = self.add_const(&ConstInput::Text(text), None, Signedness::Unsigned)?;
                self.fit_width(k, bitwidth)
            }
            Operand::Next(next) => Err(NetlistError::NextReadAsValue {
                name: self.name(next.register()).to_string(),
            }),
        }
    }

    /// The width `value` would have as a wire, without adding anything to
    /// the block.
    ///
    /// Runs every check [`as_wires`](Self::as_wires) runs with no target
    /// width, so callers can validate all operands before materializing any.
    pub fn operand_width(&self, value: &Operand) -> NetlistResult<u32> {
        match value {
            Operand::Wire(id) => {
                self.check_readable(*id)?;
                self.width(*id)
            }
            Operand::Const(input) => Ok(parse_const(input, None)?.bitwidth),
            Operand::Next(next) => Err(NetlistError::NextReadAsValue {
                name: self.name(next.register()).to_string(),
            }),
        }
    }

    /// A name for `value` in error messages.
    pub(crate) fn operand_label(&self, value: &Operand) -> String {
        match value {
            Operand::Wire(id) => self.name(*id).to_string(),
            Operand::Const(ConstInput::Int(v)) => v.to_string(),
            Operand::Const(ConstInput::Text(text)) => text.clone(),
            Operand::Next(next) => self.name(next.register()).to_string(),
        }
    }

    fn fit_width(&mut self, id: WireId, bitwidth: Option<u32>) -> NetlistResult<WireId> {
        match bitwidth {
            None => Ok(id),
            Some(target) => self.extended(id, target),
        }
    }

    pub(crate) fn check_readable(&self, id: WireId) -> NetlistResult<()> {
        if self.construction.forbid_output_reads && self.wire(id).role == Role::Output {
            return Err(NetlistError::OutputRead {
                name: self.name(id).to_string(),
            });
        }
        Ok(())
    }

    /// Concatenates wires, first argument most significant.
    ///
    /// A single wire is returned as is. The result width is the sum of the
    /// part widths.
    pub fn concat(&mut self, parts: &[WireId]) -> NetlistResult<WireId> {
        let mut total = 0u32;
        for part in parts {
            self.check_readable(*part)?;
            total = total
                .checked_add(self.width(*part)?)
                .ok_or_else(|| NetlistError::WidthOverflow {
                    name: self.name(*part).to_string(),
                })?;
        }
        match parts {
            [] => Err(NetlistError::EmptyConcat),
            [single] => Ok(*single),
            _ => {
                let dest = self.temp_wire(total);
                self.add_net(Op::Concat, None, parts.to_vec(), vec![dest]);
                Ok(dest)
            }
        }
    }

    /// Coerces every value with [`as_wires`](Self::as_wires) and concatenates them.
    pub fn concat_values<I>(&mut self, values: I) -> NetlistResult<WireId>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let values: Vec<Operand> = values.into_iter().map(Into::into).collect();
        let mut total = 0u32;
        for value in &values {
            total = total
                .checked_add(self.operand_width(value)?)
                .ok_or_else(|| NetlistError::WidthOverflow {
                    name: self.operand_label(value),
                })?;
        }
        let parts = values
            .into_iter()
            .map(|v| self.as_wires(v, None))
            .collect::<NetlistResult<Vec<_>>>()?;
        self.concat(&parts)
    }
}
