//! The seam between register staging and the conditional-update resolver.
//!
//! Inside a conditional scope a register write cannot become a clocked-update
//! net directly; it has to be multiplexed with the other guarded writes to the
//! same register. That multiplexing belongs to a [`ConditionalResolver`]. The
//! block only asks whether a scope is open and hands writes over.

use crate::error::{NetlistError, NetlistResult};
use crate::ids::WireId;

/// Receives register writes made under a condition.
pub trait ConditionalResolver {
    /// Returns `true` while construction is inside a conditional scope.
    fn in_conditional_scope(&self) -> bool;

    /// Takes ownership of one guarded register write. Emitting the eventual
    /// clocked-update net is the resolver's job.
    fn register_conditional_write(&mut self, register: WireId, next: WireId);
}

/// A register write recorded under a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalWrite {
    /// The register being written.
    pub register: WireId,
    /// The staged next value.
    pub next: WireId,
    /// Scope nesting depth at the time of the write.
    pub depth: u32,
}

/// Default resolver: a nesting counter and a log of guarded writes.
#[derive(Debug, Default)]
pub struct ConditionalUpdate {
    depth: u32,
    writes: Vec<ConditionalWrite>,
}

impl ConditionalUpdate {
    /// Creates a resolver outside of any scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a (possibly nested) conditional scope.
    pub fn enter(&mut self) {
        self.depth += 1;
    }

    /// Closes the innermost conditional scope.
    pub fn exit(&mut self) -> NetlistResult<()> {
        self.depth = self
            .depth
            .checked_sub(1)
            .ok_or(NetlistError::UnbalancedConditional)?;
        Ok(())
    }

    /// Current nesting depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Writes recorded so far, oldest first.
    pub fn pending_writes(&self) -> &[ConditionalWrite] {
        &self.writes
    }

    /// Drains the recorded writes.
    pub fn take_writes(&mut self) -> Vec<ConditionalWrite> {
        std::mem::take(&mut self.writes)
    }
}

impl ConditionalResolver for ConditionalUpdate {
    fn in_conditional_scope(&self) -> bool {
        self.depth > 0
    }

    fn register_conditional_write(&mut self, register: WireId, next: WireId) {
        self.writes.push(ConditionalWrite {
            register,
            next,
            depth: self.depth,
        });
    }
}
