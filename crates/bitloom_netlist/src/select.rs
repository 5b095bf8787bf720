//! Bit selection with list-style indexing.
//!
//! Bits are addressed least-significant first. Negative positions count
//! from the most significant end and slices follow the usual start, stop
//! and step rules of flat sequence indexing, so `h.select(-4..)` on an
//! 8-bit wire picks bits 4 through 7.

use crate::block::Block;
use crate::error::{NetlistError, NetlistResult};
use crate::ids::WireId;
use crate::net::Op;
use std::ops::{Range, RangeFrom, RangeFull, RangeTo};
use tracing::trace;

/// An index expression over the bits of a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitSelect {
    /// A single bit. Negative values count from the top.
    Index(i64),
    /// A slice with optional bounds and step.
    Slice {
        /// First position, inclusive.
        start: Option<i64>,
        /// Last position, exclusive.
        stop: Option<i64>,
        /// Stride; defaults to 1 and must not be zero.
        step: Option<i64>,
    },
}

impl BitSelect {
    /// Builds a slice with explicit optional bounds and step.
    pub fn slice(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        BitSelect::Slice { start, stop, step }
    }

    /// Resolves the expression against a wire of `width` bits.
    ///
    /// Errors carry `name` to identify the wire.
    pub fn resolve(&self, width: u32, name: &str) -> NetlistResult<Vec<u32>> {
        let len = i64::from(width);
        match *self {
            BitSelect::Index(i) => {
                let pos = if i < 0 { i + len } else { i };
                if (0..len).contains(&pos) {
                    Ok(vec![pos as u32])
                } else {
                    Err(NetlistError::IndexOutOfRange {
                        name: name.to_string(),
                        index: i,
                        bitwidth: width,
                    })
                }
            }
            BitSelect::Slice { start, stop, step } => {
                let step = step.unwrap_or(1);
                if step == 0 {
                    return Err(NetlistError::ZeroSliceStep {
                        name: name.to_string(),
                    });
                }
                let (lower, upper) = if step > 0 { (0, len) } else { (-1, len - 1) };
                let clamp = |bound: i64| {
                    if bound < 0 {
                        (bound + len).max(lower)
                    } else {
                        bound.min(upper)
                    }
                };
                let start = start.map_or(if step > 0 { lower } else { upper }, clamp);
                let stop = stop.map_or(if step > 0 { upper } else { lower }, clamp);

                let mut indices = Vec::new();
                let mut pos = start;
                while (step > 0 && pos < stop) || (step < 0 && pos > stop) {
                    indices.push(pos as u32);
                    match pos.checked_add(step) {
                        Some(next) => pos = next,
                        None => break,
                    }
                }
                Ok(indices)
            }
        }
    }
}

impl From<i64> for BitSelect {
    fn from(i: i64) -> Self {
        BitSelect::Index(i)
    }
}

impl From<i32> for BitSelect {
    fn from(i: i32) -> Self {
        BitSelect::Index(i64::from(i))
    }
}

impl From<Range<i64>> for BitSelect {
    fn from(r: Range<i64>) -> Self {
        BitSelect::slice(Some(r.start), Some(r.end), None)
    }
}

impl From<RangeFrom<i64>> for BitSelect {
    fn from(r: RangeFrom<i64>) -> Self {
        BitSelect::slice(Some(r.start), None, None)
    }
}

impl From<RangeTo<i64>> for BitSelect {
    fn from(r: RangeTo<i64>) -> Self {
        BitSelect::slice(None, Some(r.end), None)
    }
}

impl From<RangeFull> for BitSelect {
    fn from(_: RangeFull) -> Self {
        BitSelect::slice(None, None, None)
    }
}

impl Block {
    /// Selects bits of `id` with an index or slice expression.
    pub fn select(&mut self, id: WireId, index: impl Into<BitSelect>) -> NetlistResult<WireId> {
        self.check_readable(id)?;
        let width = self.width(id)?;
        let indices = index.into().resolve(width, self.name(id))?;
        self.select_bits(id, &indices)
    }

    /// Selects the given absolute bit positions of `id`, in order.
    ///
    /// Positions may repeat or appear in any order; each must be below the
    /// wire's width.
    pub fn select_bits(&mut self, id: WireId, indices: &[u32]) -> NetlistResult<WireId> {
        self.check_readable(id)?;
        let width = self.width(id)?;
        if indices.is_empty() {
            return Err(NetlistError::EmptySelection {
                name: self.name(id).to_string(),
            });
        }
        if let Some(bad) = indices.iter().find(|i| **i >= width) {
            return Err(NetlistError::IndexOutOfRange {
                name: self.name(id).to_string(),
                index: i64::from(*bad),
                bitwidth: width,
            });
        }
        trace!(wire = self.name(id), ?indices, "selecting bits");
        let dest = self.temp_wire(indices.len() as u32);
        self.add_net(Op::Select, Some(indices.to_vec()), vec![id], vec![dest]);
        if indices.windows(2).all(|w| w[1] == w[0] + 1) {
            self.record_provenance(dest, id, indices[0]);
        }
        Ok(dest)
    }
}
