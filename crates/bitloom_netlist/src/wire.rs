//! Wire vectors: the named, fixed-width handles every expression works over.
//!
//! A [`WireVector`] is plain data stored in a [`Block`](crate::block::Block).
//! Its [`Role`] decides which writes are legal and its [`Signedness`] decides
//! how it is widened when paired with a wider operand.

use crate::ids::{NetId, WireId};
use bitloom_common::Ident;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// What part a wire plays in the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// An internal wire, driven by exactly one net.
    Plain,
    /// A block input. Never driven from inside the block.
    Input,
    /// A block output, driven by exactly one net.
    Output,
    /// An unsigned constant. Carries a value and has no driver.
    Const,
    /// A clocked state element, driven through its next value.
    Register,
}

/// How a wire is widened to match a wider operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Signedness {
    /// Widen with zeros.
    #[default]
    Unsigned,
    /// Widen by replicating the most significant bit.
    Signed,
}

/// Progress of a register through the next-value protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NextState {
    /// No next value staged yet.
    #[default]
    Unassigned,
    /// A next value was captured but not yet committed.
    Pending,
    /// The clocked update was emitted, or handed to the conditional resolver.
    Committed,
}

/// Extra state carried by [`Role::Register`] wires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterState {
    /// The wire staged as the next value.
    pub next: Option<WireId>,
    /// Whether the next value was staged inside a conditional scope.
    pub conditional: bool,
    /// Where the register is in the staging protocol.
    pub phase: NextState,
}

/// A named bit-vector handle owned by a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireVector {
    /// The ID of this wire within its block.
    pub id: WireId,
    /// The unique name of this wire within its block.
    pub name: Ident,
    /// Width in bits; `None` until the first write resolves it.
    pub bitwidth: Option<u32>,
    /// The wire's role.
    pub role: Role,
    /// Extension behaviour.
    pub signedness: Signedness,
    /// The value of a [`Role::Const`] wire.
    pub value: Option<BigUint>,
    /// Next-value state of a [`Role::Register`] wire.
    pub register: Option<RegisterState>,
    /// The net that writes this wire, if any.
    pub driver: Option<NetId>,
}

impl WireVector {
    /// Short code used when rendering raw names (`W`, `I`, `SR`, ...).
    pub fn code(&self) -> &'static str {
        match (self.signedness, self.role) {
            (Signedness::Unsigned, Role::Plain) => "W",
            (Signedness::Unsigned, Role::Input) => "I",
            (Signedness::Unsigned, Role::Output) => "O",
            (Signedness::Unsigned, Role::Const) => "C",
            (Signedness::Unsigned, Role::Register) => "R",
            (Signedness::Signed, Role::Plain) => "SW",
            (Signedness::Signed, Role::Input) => "SI",
            (Signedness::Signed, Role::Output) => "SO",
            (Signedness::Signed, Role::Const) => "SC",
            (Signedness::Signed, Role::Register) => "SR",
        }
    }

    /// Returns `true` if the wire sign-extends.
    pub fn is_signed(&self) -> bool {
        self.signedness == Signedness::Signed
    }

    /// Returns `true` for registers.
    pub fn is_register(&self) -> bool {
        self.role == Role::Register
    }

    /// Where a register stands in the next-value protocol, `None` for other roles.
    pub fn next_state(&self) -> Option<NextState> {
        self.register.as_ref().map(|r| r.phase)
    }
}
