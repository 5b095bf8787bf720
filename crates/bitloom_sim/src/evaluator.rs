//! Value semantics of a single net.
//!
//! [`eval_net`] computes the value a combinational net drives, given the
//! values and widths of its arguments. Every result is masked to the width
//! of the destination wire, so subtraction wraps the way a fixed-width
//! borrow chain does.

use bitloom_netlist::Op;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// An argument value together with the width of the wire carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizedValue {
    /// The value, always below `2^width`.
    pub value: BigUint,
    /// Width of the wire.
    pub width: u32,
}

impl SizedValue {
    /// Pairs a value with its width, masking the value to fit.
    pub fn new(value: BigUint, width: u32) -> Self {
        Self {
            value: mask(value, width),
            width,
        }
    }
}

/// All-ones value of `width` bits.
pub fn ones(width: u32) -> BigUint {
    (BigUint::one() << width) - BigUint::one()
}

/// Truncates `value` to its low `width` bits.
pub fn mask(value: BigUint, width: u32) -> BigUint {
    value & ones(width)
}

fn bool_value(b: bool) -> BigUint {
    if b {
        BigUint::one()
    } else {
        BigUint::zero()
    }
}

/// Evaluates a combinational net.
///
/// `param` is the net's immediate, used only by [`Op::Select`].
/// [`Op::Register`] is sequential and evaluates to its staged argument,
/// which is what the register latches at the clock edge.
pub fn eval_net(op: Op, param: Option<&[u32]>, args: &[SizedValue], dest_width: u32) -> BigUint {
    let arg = |i: usize| &args[i].value;
    let result = match op {
        Op::Wire | Op::Register => arg(0).clone(),
        Op::And => arg(0) & arg(1),
        Op::Or => arg(0) | arg(1),
        Op::Xor => arg(0) ^ arg(1),
        Op::Not => ones(args[0].width) ^ arg(0),
        Op::Add => arg(0) + arg(1),
        // a - b computed as a + (2^w - b) so the borrow wraps
        Op::Sub => arg(0) + (BigUint::one() << dest_width) - arg(1),
        Op::Mul => arg(0) * arg(1),
        Op::Lt => bool_value(arg(0) < arg(1)),
        Op::Gt => bool_value(arg(0) > arg(1)),
        Op::Eq => bool_value(arg(0) == arg(1)),
        Op::Select => {
            let mut out = BigUint::zero();
            for (pos, bit) in param.unwrap_or_default().iter().enumerate() {
                if arg(0).bit(u64::from(*bit)) {
                    out.set_bit(pos as u64, true);
                }
            }
            out
        }
        Op::Concat => args.iter().fold(BigUint::zero(), |acc, part| {
            (acc << part.width) | &part.value
        }),
    };
    mask(result, dest_width)
}
