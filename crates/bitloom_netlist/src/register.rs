//! Two-phase register assignment and general wire assignment.
//!
//! A register is read as an ordinary wire but written only through its next
//! value: [`Block::stage_next`] coerces the right-hand side to the register
//! width, moves the register to [`NextState::Pending`] and commits it at
//! once. Outside a conditional scope the commit is a clocked-update net;
//! inside one it is handed to the [`ConditionalResolver`].

use crate::block::Block;
use crate::coerce::Operand;
use crate::conditional::ConditionalResolver;
use crate::error::{NetlistError, NetlistResult};
use crate::ids::{NetId, WireId};
use crate::net::Op;
use crate::wire::{NextState, Role};
use tracing::debug;

/// The write-only next-value view of a register.
///
/// Obtained from [`Block::next`]. Passing it where a value is expected
/// fails with [`NetlistError::NextReadAsValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextRef {
    register: WireId,
}

impl NextRef {
    /// The register this proxy writes.
    pub fn register(self) -> WireId {
        self.register
    }

    /// Stages `value` as the register's next value. See [`Block::stage_next`].
    pub fn stage(self, block: &mut Block, value: impl Into<Operand>) -> NetlistResult<RegisterCommit> {
        block.stage_next(self.register, value)
    }
}

/// How a staged register write was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterCommit {
    /// A clocked-update net was emitted.
    Emitted(NetId),
    /// The write went to the conditional resolver.
    Deferred,
}

impl Block {
    /// The next-value proxy of a register.
    pub fn next(&self, register: WireId) -> NetlistResult<NextRef> {
        if !self.wire(register).is_register() {
            return Err(NetlistError::NotARegister {
                name: self.name(register).to_string(),
            });
        }
        Ok(NextRef { register })
    }

    /// Stages and commits a register's next value using the block's own
    /// conditional resolver.
    pub fn stage_next(
        &mut self,
        register: WireId,
        value: impl Into<Operand>,
    ) -> NetlistResult<RegisterCommit> {
        let mut resolver = std::mem::take(&mut self.conditional);
        let result = self.stage_next_with(register, value, &mut resolver);
        self.conditional = resolver;
        result
    }

    /// Stages and commits a register's next value against an external
    /// conditional resolver.
    ///
    /// A register whose width was left open takes the width of the
    /// coerced value. Staging twice is an error, and nothing is emitted
    /// when it happens.
    pub fn stage_next_with(
        &mut self,
        register: WireId,
        value: impl Into<Operand>,
        resolver: &mut dyn ConditionalResolver,
    ) -> NetlistResult<RegisterCommit> {
        match self.wire(register).next_state() {
            None => {
                return Err(NetlistError::NotARegister {
                    name: self.name(register).to_string(),
                })
            }
            Some(NextState::Unassigned) => {}
            Some(_) => {
                return Err(NetlistError::RegisterRestaged {
                    name: self.name(register).to_string(),
                })
            }
        }

        let staged = self.as_wires(value, self.wire(register).bitwidth)?;
        let width = self.width(staged)?;
        let conditional = resolver.in_conditional_scope();
        {
            let reg = self.wire_mut(register);
            reg.bitwidth.get_or_insert(width);
            if let Some(state) = reg.register.as_mut() {
                state.next = Some(staged);
                state.conditional = conditional;
                state.phase = NextState::Pending;
            }
        }

        let commit = if conditional {
            resolver.register_conditional_write(register, staged);
            RegisterCommit::Deferred
        } else {
            RegisterCommit::Emitted(self.add_net(
                Op::Register,
                None,
                vec![staged],
                vec![register],
            ))
        };
        if let Some(state) = self.wire_mut(register).register.as_mut() {
            state.phase = NextState::Committed;
        }
        debug!(register = self.name(register), ?commit, "register committed");
        Ok(commit)
    }

    /// Drives `dest` from `value` with a plain connection net.
    ///
    /// Only plain wires and outputs can be driven, and only once. A
    /// pending `dest` width is fixed to the width of `value`.
    pub fn assign(&mut self, dest: WireId, value: impl Into<Operand>) -> NetlistResult<NetId> {
        let name = || self.name(dest).to_string();
        match self.wire(dest).role {
            Role::Input => return Err(NetlistError::InputAssignment { name: name() }),
            Role::Const => return Err(NetlistError::ConstAssignment { name: name() }),
            Role::Register => return Err(NetlistError::RegisterDirectAssignment { name: name() }),
            Role::Plain | Role::Output => {}
        }
        if self.wire(dest).driver.is_some() {
            return Err(NetlistError::MultipleDrivers { name: name() });
        }

        let src = self.as_wires(value, self.wire(dest).bitwidth)?;
        let width = self.width(src)?;
        self.wire_mut(dest).bitwidth.get_or_insert(width);
        Ok(self.add_net(Op::Wire, None, vec![src], vec![dest]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditional::ConditionalUpdate;
    use crate::error::ErrorKind;

    #[test]
    fn staging_emits_one_clocked_update() {
        let mut b = Block::new();
        let r = b.register(Some(4), Some("r")).unwrap();
        let a = b.input(Some(4), Some("a")).unwrap();
        let commit = b.stage_next(r, a).unwrap();
        let RegisterCommit::Emitted(net) = commit else {
            panic!("expected an emitted net");
        };
        assert_eq!(b.net_count(), 1);
        let net = b.net(net);
        assert_eq!(net.op, Op::Register);
        assert_eq!(net.args, vec![a]);
        assert_eq!(net.dests, vec![r]);
        assert_eq!(b.wire(r).next_state(), Some(NextState::Committed));
        assert_eq!(b.wire(r).register.unwrap().next, Some(a));
    }

    #[test]
    fn restaging_is_rejected_without_new_nets() {
        let mut b = Block::new();
        let r = b.register(Some(4), Some("r")).unwrap();
        b.stage_next(r, 1).unwrap();
        let nets = b.net_count();
        let wires = b.wire_count();
        let err = b.stage_next(r, 2).unwrap_err();
        assert_eq!(err, NetlistError::RegisterRestaged { name: "r".into() });
        assert_eq!(err.kind(), ErrorKind::Misuse);
        assert_eq!(b.net_count(), nets);
        assert_eq!(b.wire_count(), wires);
    }

    #[test]
    fn staging_in_scope_defers_to_resolver() {
        let mut b = Block::new();
        let r = b.register(Some(4), Some("r")).unwrap();
        b.enter_conditional();
        let commit = b.stage_next(r, 3).unwrap();
        b.exit_conditional().unwrap();

        assert_eq!(commit, RegisterCommit::Deferred);
        assert_eq!(b.net_count(), 0);
        let writes = b.conditional().pending_writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].register, r);
        assert!(b.wire(r).register.unwrap().conditional);
        assert_eq!(b.wire(r).next_state(), Some(NextState::Committed));
    }

    #[test]
    fn external_resolver_receives_write() {
        let mut b = Block::new();
        let r = b.register(Some(2), Some("r")).unwrap();
        let mut resolver = ConditionalUpdate::new();
        resolver.enter();
        b.stage_next_with(r, 1, &mut resolver).unwrap();
        assert_eq!(resolver.pending_writes().len(), 1);
        assert!(b.conditional().pending_writes().is_empty());
    }

    #[test]
    fn staging_fixes_open_register_width() {
        let mut b = Block::new();
        let r = b.register(None, Some("r")).unwrap();
        let a = b.input(Some(6), Some("a")).unwrap();
        b.stage_next(r, a).unwrap();
        assert_eq!(b.width(r).unwrap(), 6);
    }

    #[test]
    fn staging_widens_narrow_value() {
        let mut b = Block::new();
        let r = b.register(Some(8), Some("r")).unwrap();
        let a = b.input(Some(3), Some("a")).unwrap();
        let RegisterCommit::Emitted(net) = b.stage_next(r, a).unwrap() else {
            panic!("expected an emitted net");
        };
        let staged = b.net(net).args[0];
        assert_eq!(b.width(staged).unwrap(), 8);
    }

    #[test]
    fn next_proxy_stages() {
        let mut b = Block::new();
        let r = b.register(Some(4), Some("r")).unwrap();
        let next = b.next(r).unwrap();
        assert_eq!(next.register(), r);
        next.stage(&mut b, 5).unwrap();
        assert_eq!(b.wire(r).next_state(), Some(NextState::Committed));
    }

    #[test]
    fn next_of_non_register() {
        let mut b = Block::new();
        let w = b.wire_vector(Some(4), Some("w")).unwrap();
        assert_eq!(
            b.next(w).unwrap_err(),
            NetlistError::NotARegister { name: "w".into() }
        );
        assert!(b.stage_next(w, 1).is_err());
    }

    #[test]
    fn assign_by_role() {
        let mut b = Block::new();
        let i = b.input(Some(4), Some("i")).unwrap();
        let r = b.register(Some(4), Some("r")).unwrap();
        let k = b.constant(3, Some(4)).unwrap();
        let o = b.output(Some(4), Some("o")).unwrap();

        assert_eq!(
            b.assign(i, 1).unwrap_err(),
            NetlistError::InputAssignment { name: "i".into() }
        );
        assert!(matches!(
            b.assign(k, 1).unwrap_err(),
            NetlistError::ConstAssignment { .. }
        ));
        assert_eq!(
            b.assign(r, 1).unwrap_err(),
            NetlistError::RegisterDirectAssignment { name: "r".into() }
        );
        let net = b.assign(o, i).unwrap();
        assert_eq!(b.net(net).op, Op::Wire);
        assert_eq!(
            b.assign(o, i).unwrap_err(),
            NetlistError::MultipleDrivers { name: "o".into() }
        );
    }

    #[test]
    fn assign_resolves_pending_width() {
        let mut b = Block::new();
        let w = b.wire_vector(None, Some("w")).unwrap();
        assert_eq!(b.raw_name(w), "w/?W");
        let a = b.input(Some(5), Some("a")).unwrap();
        b.assign(w, a).unwrap();
        assert_eq!(b.width(w).unwrap(), 5);
        assert_eq!(b.raw_name(w), "w/5W");
    }

    #[test]
    fn assign_rejects_wider_source() {
        let mut b = Block::new();
        let w = b.wire_vector(Some(2), Some("w")).unwrap();
        let a = b.input(Some(5), Some("a")).unwrap();
        assert!(matches!(
            b.assign(w, a).unwrap_err(),
            NetlistError::ShrinkExtension { from: 5, to: 2, .. }
        ));
    }
}
