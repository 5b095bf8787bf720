//! The block: owner of every wire and net in a circuit under construction.
//!
//! A [`Block`] allocates names, stores wires and nets in append-only arenas,
//! and is passed explicitly to every construction call. There is no global
//! default block.

use crate::arena::Arena;
use crate::conditional::ConditionalUpdate;
use crate::error::{NetlistError, NetlistResult};
use crate::ids::{NetId, WireId};
use crate::literal::{parse_const, ConstInput};
use crate::net::{LogicNet, Op};
use crate::wire::{NextState, RegisterState, Role, Signedness, WireVector};
use bitloom_common::{Ident, Interner};
use bitloom_config::{BuildConfig, ConstructionConfig, NamingConfig};
use num_bigint::BigUint;
use std::collections::HashMap;
use tracing::{debug, warn};

/// A circuit under construction.
#[derive(Debug)]
pub struct Block {
    wires: Arena<WireId, WireVector>,
    nets: Arena<NetId, LogicNet>,
    interner: Interner,
    by_name: HashMap<Ident, WireId>,
    /// Derived wire -> (source wire, bit offset), for diagnostic names.
    provenance: HashMap<WireId, (WireId, u32)>,
    naming: NamingConfig,
    pub(crate) construction: ConstructionConfig,
    next_temp: u32,
    next_const: u32,
    pub(crate) conditional: ConditionalUpdate,
}

impl Default for Block {
    fn default() -> Self {
        Self::new()
    }
}

impl Block {
    /// Creates an empty block with default naming and checks.
    pub fn new() -> Self {
        Self::with_config(&BuildConfig::default())
    }

    /// Creates an empty block using the naming and construction sections of `config`.
    pub fn with_config(config: &BuildConfig) -> Self {
        Self {
            wires: Arena::new(),
            nets: Arena::new(),
            interner: Interner::new(),
            by_name: HashMap::new(),
            provenance: HashMap::new(),
            naming: config.naming.clone(),
            construction: config.construction.clone(),
            next_temp: 0,
            next_const: 0,
            conditional: ConditionalUpdate::new(),
        }
    }

    // --- Declarations ---

    /// Declares a wire of the given role and signedness.
    ///
    /// `bitwidth` may be left `None`; the first write then fixes it. Use
    /// [`constant`](Self::constant) for [`Role::Const`].
    pub fn declare(
        &mut self,
        role: Role,
        signedness: Signedness,
        bitwidth: Option<u32>,
        name: Option<&str>,
    ) -> NetlistResult<WireId> {
        if role == Role::Const {
            return Err(NetlistError::ConstWithoutValue {
                name: name.unwrap_or_default().to_string(),
            });
        }
        if bitwidth == Some(0) {
            return Err(NetlistError::InvalidBitwidth {
                name: name.unwrap_or("<unnamed>").to_string(),
                bitwidth: 0,
            });
        }
        let ident = self.allocate_temp_name(name)?;
        let register = (role == Role::Register).then(RegisterState::default);
        Ok(self.add_wirevector(ident, bitwidth, role, signedness, None, register))
    }

    /// Declares an unsigned internal wire.
    pub fn wire_vector(&mut self, bitwidth: Option<u32>, name: Option<&str>) -> NetlistResult<WireId> {
        self.declare(Role::Plain, Signedness::Unsigned, bitwidth, name)
    }

    /// Declares an unsigned block input.
    pub fn input(&mut self, bitwidth: Option<u32>, name: Option<&str>) -> NetlistResult<WireId> {
        self.declare(Role::Input, Signedness::Unsigned, bitwidth, name)
    }

    /// Declares an unsigned block output.
    pub fn output(&mut self, bitwidth: Option<u32>, name: Option<&str>) -> NetlistResult<WireId> {
        self.declare(Role::Output, Signedness::Unsigned, bitwidth, name)
    }

    /// Declares an unsigned register.
    pub fn register(&mut self, bitwidth: Option<u32>, name: Option<&str>) -> NetlistResult<WireId> {
        self.declare(Role::Register, Signedness::Unsigned, bitwidth, name)
    }

    /// Declares a sign-extending internal wire.
    pub fn signed_wire_vector(
        &mut self,
        bitwidth: Option<u32>,
        name: Option<&str>,
    ) -> NetlistResult<WireId> {
        self.declare(Role::Plain, Signedness::Signed, bitwidth, name)
    }

    /// Declares a sign-extending block input.
    pub fn signed_input(&mut self, bitwidth: Option<u32>, name: Option<&str>) -> NetlistResult<WireId> {
        self.declare(Role::Input, Signedness::Signed, bitwidth, name)
    }

    /// Declares a sign-extending block output.
    pub fn signed_output(
        &mut self,
        bitwidth: Option<u32>,
        name: Option<&str>,
    ) -> NetlistResult<WireId> {
        self.declare(Role::Output, Signedness::Signed, bitwidth, name)
    }

    /// Declares a sign-extending register.
    pub fn signed_register(
        &mut self,
        bitwidth: Option<u32>,
        name: Option<&str>,
    ) -> NetlistResult<WireId> {
        self.declare(Role::Register, Signedness::Signed, bitwidth, name)
    }

    /// Creates an unsigned constant from an integer or a sized literal.
    pub fn constant(
        &mut self,
        value: impl Into<ConstInput>,
        bitwidth: Option<u32>,
    ) -> NetlistResult<WireId> {
        self.add_const(&value.into(), bitwidth, Signedness::Unsigned)
    }

    /// Creates a constant that sign-extends from its top bit.
    pub fn signed_constant(
        &mut self,
        value: impl Into<ConstInput>,
        bitwidth: Option<u32>,
    ) -> NetlistResult<WireId> {
        self.add_const(&value.into(), bitwidth, Signedness::Signed)
    }

    pub(crate) fn add_const(
        &mut self,
        input: &ConstInput,
        bitwidth: Option<u32>,
        signedness: Signedness,
    ) -> NetlistResult<WireId> {
        let parsed = parse_const(input, bitwidth)?;
        let ident = self.allocate_const_name(&parsed.value);
        Ok(self.add_wirevector(
            ident,
            Some(parsed.bitwidth),
            Role::Const,
            signedness,
            Some(parsed.value),
            None,
        ))
    }

    // --- Storage ---

    fn add_wirevector(
        &mut self,
        name: Ident,
        bitwidth: Option<u32>,
        role: Role,
        signedness: Signedness,
        value: Option<BigUint>,
        register: Option<RegisterState>,
    ) -> WireId {
        let id = self.wires.next_id();
        self.wires.alloc(WireVector {
            id,
            name,
            bitwidth,
            role,
            signedness,
            value,
            register,
            driver: None,
        });
        self.by_name.insert(name, id);
        debug!(wire = %id, name = self.interner.resolve(name), ?bitwidth, ?role, "added wire");
        id
    }

    /// Appends a net and records it as the driver of its destinations.
    ///
    /// All validation for the calling operation must already have happened.
    pub(crate) fn add_net(
        &mut self,
        op: Op,
        param: Option<Vec<u32>>,
        args: Vec<WireId>,
        dests: Vec<WireId>,
    ) -> NetId {
        let id = self.nets.next_id();
        for dest in &dests {
            self.wires[*dest].driver = Some(id);
        }
        debug!(net = %id, op = %op, ?args, ?dests, "added net");
        self.nets.alloc(LogicNet {
            id,
            op,
            param,
            args,
            dests,
        })
    }

    /// Allocates a fresh wire for an operation result and returns it.
    pub(crate) fn temp_wire(&mut self, bitwidth: u32) -> WireId {
        let ident = self.fresh_temp_ident();
        self.add_wirevector(
            ident,
            Some(bitwidth),
            Role::Plain,
            Signedness::Unsigned,
            None,
            None,
        )
    }

    // --- Names ---

    /// Returns `name` interned if it is free, or a fresh temporary name when `None`.
    pub fn allocate_temp_name(&mut self, name: Option<&str>) -> NetlistResult<Ident> {
        match name {
            Some(n) => {
                if self.name_in_use(n) {
                    return Err(NetlistError::DuplicateName {
                        name: n.to_string(),
                    });
                }
                Ok(self.interner.get_or_intern(n))
            }
            None => Ok(self.fresh_temp_ident()),
        }
    }

    fn fresh_temp_ident(&mut self) -> Ident {
        loop {
            let candidate = format!("{}{}", self.naming.temp_prefix, self.next_temp);
            self.next_temp += 1;
            if !self.name_in_use(&candidate) {
                return self.interner.get_or_intern(&candidate);
            }
        }
    }

    /// Returns a fresh name for a constant wire holding `value`.
    pub fn allocate_const_name(&mut self, value: &BigUint) -> Ident {
        loop {
            let candidate = format!("{}_{}_{}", self.naming.const_prefix, self.next_const, value);
            self.next_const += 1;
            if !self.name_in_use(&candidate) {
                return self.interner.get_or_intern(&candidate);
            }
        }
    }

    fn name_in_use(&self, name: &str) -> bool {
        self.interner
            .get(name)
            .is_some_and(|id| self.by_name.contains_key(&id))
    }

    /// Records that `derived` mirrors bits of `source` starting at `offset`.
    ///
    /// Only used to render [`original_name`](Self::original_name).
    pub fn record_provenance(&mut self, derived: WireId, source: WireId, offset: u32) {
        self.provenance.insert(derived, (source, offset));
    }

    /// Renders `<name>/<width><code>`, with `?` for a pending width.
    pub fn raw_name(&self, id: WireId) -> String {
        let w = &self.wires[id];
        let width = w
            .bitwidth
            .map_or_else(|| "?".to_string(), |b| b.to_string());
        format!("{}/{}{}", self.interner.resolve(w.name), width, w.code())
    }

    /// Renders the raw name of the wire a derived wire came from, suffixed
    /// with `_part_<offset>` for each step back.
    pub fn original_name(&self, id: WireId) -> String {
        let mut suffix = String::new();
        let mut current = id;
        while let Some((source, offset)) = self.provenance.get(&current) {
            suffix = format!("_part_{offset}{suffix}");
            current = *source;
        }
        format!("{}{}", self.raw_name(current), suffix)
    }

    // --- Queries ---

    /// Returns the wire with the given ID.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different block.
    pub fn wire(&self, id: WireId) -> &WireVector {
        &self.wires[id]
    }

    pub(crate) fn wire_mut(&mut self, id: WireId) -> &mut WireVector {
        &mut self.wires[id]
    }

    /// Returns the net with the given ID.
    pub fn net(&self, id: NetId) -> &LogicNet {
        &self.nets[id]
    }

    /// Iterates over all wires in creation order.
    pub fn wires(&self) -> impl Iterator<Item = &WireVector> {
        self.wires.values()
    }

    /// Iterates over all nets in emission order.
    pub fn nets(&self) -> impl Iterator<Item = &LogicNet> {
        self.nets.values()
    }

    /// Number of wires.
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Number of nets.
    pub fn net_count(&self) -> usize {
        self.nets.len()
    }

    /// Looks a wire up by name.
    pub fn wire_by_name(&self, name: &str) -> Option<WireId> {
        self.interner
            .get(name)
            .and_then(|ident| self.by_name.get(&ident).copied())
    }

    /// The plain name of a wire.
    pub fn name(&self, id: WireId) -> &str {
        self.interner.resolve(self.wires[id].name)
    }

    /// The resolved width of a wire.
    pub fn width(&self, id: WireId) -> NetlistResult<u32> {
        self.wires[id]
            .bitwidth
            .ok_or_else(|| NetlistError::UnresolvedWidth {
                name: self.name(id).to_string(),
            })
    }

    /// Wires never become host booleans; this always fails.
    ///
    /// Branching on a wire at construction time would silently pick one
    /// side of the circuit instead of describing a multiplexer.
    pub fn as_bool(&self, id: WireId) -> NetlistResult<bool> {
        Err(NetlistError::BooleanConversion {
            name: self.name(id).to_string(),
        })
    }

    /// Renders a net as `dest <-- op -- args`, with an optional `(param)`.
    pub fn describe_net(&self, id: NetId) -> String {
        let net = &self.nets[id];
        let dests: Vec<String> = net.dests.iter().map(|w| self.raw_name(*w)).collect();
        let args: Vec<String> = net.args.iter().map(|w| self.raw_name(*w)).collect();
        let param = net.param.as_ref().map_or_else(String::new, |p| {
            let items: Vec<String> = p.iter().map(u32::to_string).collect();
            format!(" ({})", items.join(", "))
        });
        format!(
            "{} <-- {} -- {}{}",
            dests.join(", "),
            net.op,
            args.join(", "),
            param
        )
    }

    // --- Conditional scopes ---

    /// Opens a conditional scope on the block's own resolver.
    pub fn enter_conditional(&mut self) {
        self.conditional.enter();
    }

    /// Closes the innermost conditional scope.
    pub fn exit_conditional(&mut self) -> NetlistResult<()> {
        self.conditional.exit()
    }

    /// The block's own conditional resolver.
    pub fn conditional(&self) -> &ConditionalUpdate {
        &self.conditional
    }

    /// Mutable access to the block's own conditional resolver.
    pub fn conditional_mut(&mut self) -> &mut ConditionalUpdate {
        &mut self.conditional
    }

    // --- Completion ---

    /// Registers that have not reached [`NextState::Committed`].
    pub fn unfinished_registers(&self) -> Vec<WireId> {
        self.wires
            .values()
            .filter(|w| w.next_state().is_some_and(|s| s != NextState::Committed))
            .map(|w| w.id)
            .collect()
    }

    /// Fails on the first register without a committed next value, unless
    /// the construction config allows that.
    pub fn check_complete(&self) -> NetlistResult<()> {
        let unfinished = self.unfinished_registers();
        for id in &unfinished {
            warn!(register = self.name(*id), "register has no committed next value");
        }
        match unfinished.first() {
            Some(id) if self.construction.require_committed_registers => {
                Err(NetlistError::IncompleteRegister {
                    name: self.name(*id).to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}
