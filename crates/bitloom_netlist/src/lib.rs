//! Bit-vector expression algebra and netlist construction.
//!
//! A [`Block`] owns every [`WireVector`] and [`LogicNet`] of one circuit.
//! Expressions are built by calling methods on the block with [`WireId`]
//! handles, integers or sized literals; each call validates first and then
//! appends its nets, so a failed call leaves the netlist untouched.
//!
//! ```
//! use bitloom_netlist::Block;
//!
//! let mut b = Block::new();
//! let a = b.constant(5, Some(4))?;
//! let c = b.constant(3, Some(4))?;
//! let sum = b.add(a, c)?;
//! assert_eq!(b.width(sum)?, 5);
//! # Ok::<(), bitloom_netlist::NetlistError>(())
//! ```

#![warn(missing_docs)]

pub mod arena;
pub mod block;
pub mod coerce;
pub mod conditional;
pub mod error;
pub mod extend;
pub mod ids;
pub mod literal;
pub mod net;
pub mod ops;
pub mod register;
pub mod select;
pub mod wire;

pub use arena::{Arena, ArenaId};
pub use block::Block;
pub use coerce::Operand;
pub use conditional::{ConditionalResolver, ConditionalUpdate, ConditionalWrite};
pub use error::{ErrorKind, NetlistError, NetlistResult};
pub use ids::{NetId, WireId};
pub use literal::{min_bitwidth, parse_const, parse_literal, ConstInput, ParsedConst};
pub use net::{LogicNet, Op};
pub use ops::BinaryOp;
pub use register::{NextRef, RegisterCommit};
pub use select::BitSelect;
pub use wire::{NextState, RegisterState, Role, Signedness, WireVector};
