//! Cycle-based simulation kernel.
//!
//! [`Simulation`] orders the combinational nets of a [`Block`] once, at
//! construction, and then evaluates them in that order every cycle.
//! Registers are sources within a cycle: they hold their current value
//! while the combinational logic settles and latch their staged next value
//! at the end of [`Simulation::step`].

use std::collections::HashMap;

use bitloom_config::SimConfig;
use bitloom_netlist::{Block, NetId, Role, WireId};
use num_bigint::BigUint;
use num_traits::Zero;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, trace};

use crate::error::SimError;
use crate::evaluator::{eval_net, SizedValue};

/// Input values for one cycle, keyed by input wire name.
pub type CycleInputs = HashMap<String, BigUint>;

/// A running simulation of one block.
#[derive(Debug)]
pub struct Simulation<'a> {
    block: &'a Block,
    /// Combinational nets in evaluation order.
    order: Vec<NetId>,
    /// `(register, staged next value)` for every clocked-update net.
    latches: Vec<(WireId, WireId)>,
    /// Current register contents.
    state: HashMap<WireId, BigUint>,
    /// Values of the last evaluated cycle.
    values: HashMap<WireId, BigUint>,
    /// Per-cycle values of inputs, outputs and registers.
    trace: HashMap<String, Vec<BigUint>>,
    cycle: u64,
    max_cycles: u64,
}

impl<'a> Simulation<'a> {
    /// Prepares `block` for simulation with default bounds.
    pub fn new(block: &'a Block) -> Result<Self, SimError> {
        Self::with_config(block, &SimConfig::default())
    }

    /// Prepares `block` for simulation.
    ///
    /// Fails if any wire has no resolved width or if the combinational nets
    /// contain a cycle. Registers start at zero.
    pub fn with_config(block: &'a Block, config: &SimConfig) -> Result<Self, SimError> {
        if let Some(w) = block.wires().find(|w| w.bitwidth.is_none()) {
            return Err(SimError::UnresolvedWidth {
                name: block.name(w.id).to_string(),
            });
        }

        let mut graph: DiGraph<NetId, ()> = DiGraph::new();
        let mut nodes: HashMap<NetId, NodeIndex> = HashMap::new();
        let mut latches = Vec::new();
        for net in block.nets() {
            if net.op.is_sequential() {
                latches.push((net.dest(), net.args[0]));
            } else {
                nodes.insert(net.id, graph.add_node(net.id));
            }
        }
        for net in block.nets().filter(|n| !n.op.is_sequential()) {
            for arg in &net.args {
                let upstream = block.wire(*arg).driver.and_then(|d| nodes.get(&d));
                if let Some(from) = upstream {
                    graph.add_edge(*from, nodes[&net.id], ());
                }
            }
        }
        let order = toposort(&graph, None)
            .map_err(|cycle| SimError::CombinationalLoop {
                wire: block.name(block.net(graph[cycle.node_id()]).dest()).to_string(),
            })?
            .into_iter()
            .map(|node| graph[node])
            .collect::<Vec<_>>();

        let state = latches
            .iter()
            .map(|(reg, _)| (*reg, BigUint::zero()))
            .collect();
        debug!(
            nets = order.len(),
            registers = latches.len(),
            "simulation prepared"
        );
        Ok(Self {
            block,
            order,
            latches,
            state,
            values: HashMap::new(),
            trace: HashMap::new(),
            cycle: 0,
            max_cycles: config.max_cycles,
        })
    }

    /// Evaluates one clock cycle.
    ///
    /// Every block input must have a value in `inputs`. After the call,
    /// [`value`](Self::value) reports this cycle's values; registers read
    /// as their value during the cycle, before latching.
    pub fn step(&mut self, inputs: &CycleInputs) -> Result<(), SimError> {
        if self.cycle >= self.max_cycles {
            return Err(SimError::CycleLimit {
                max_cycles: self.max_cycles,
            });
        }
        let block = self.block;
        for name in inputs.keys() {
            let is_input = block
                .wire_by_name(name)
                .is_some_and(|id| block.wire(id).role == Role::Input);
            if !is_input {
                return Err(SimError::UnknownWire { name: name.clone() });
            }
        }

        let mut values = HashMap::new();
        for wire in block.wires() {
            let name = block.name(wire.id);
            let width = self.width(wire.id)?;
            match wire.role {
                Role::Input => {
                    let value = inputs.get(name).ok_or_else(|| SimError::MissingInput {
                        name: name.to_string(),
                    })?;
                    if value.bits() > u64::from(width) {
                        return Err(SimError::InputTooWide {
                            name: name.to_string(),
                            value: value.to_string(),
                            bitwidth: width,
                        });
                    }
                    values.insert(wire.id, value.clone());
                }
                Role::Const => {
                    values.insert(wire.id, wire.value.clone().unwrap_or_default());
                }
                Role::Register => {
                    let current = self.state.get(&wire.id).cloned().unwrap_or_default();
                    values.insert(wire.id, current);
                }
                Role::Plain | Role::Output => {}
            }
        }

        for net_id in &self.order {
            let net = block.net(*net_id);
            let args = net
                .args
                .iter()
                .map(|arg| {
                    let value = values.get(arg).cloned().ok_or_else(|| SimError::Undriven {
                        name: block.name(*arg).to_string(),
                    })?;
                    Ok(SizedValue::new(value, self.width(*arg)?))
                })
                .collect::<Result<Vec<_>, SimError>>()?;
            let dest = net.dest();
            let result = eval_net(net.op, net.param.as_deref(), &args, self.width(dest)?);
            values.insert(dest, result);
        }

        let latched = self
            .latches
            .iter()
            .map(|(reg, next)| {
                let staged = values.get(next).cloned().ok_or_else(|| SimError::Undriven {
                    name: block.name(*next).to_string(),
                })?;
                Ok((*reg, staged))
            })
            .collect::<Result<Vec<_>, SimError>>()?;
        self.state.extend(latched);

        for wire in block.wires() {
            if matches!(wire.role, Role::Input | Role::Output | Role::Register) {
                if let Some(v) = values.get(&wire.id) {
                    self.trace
                        .entry(block.name(wire.id).to_string())
                        .or_default()
                        .push(v.clone());
                }
            }
        }

        trace!(cycle = self.cycle, "cycle evaluated");
        self.values = values;
        self.cycle += 1;
        Ok(())
    }

    /// Steps once per entry of `inputs_per_cycle`.
    ///
    /// Fails up front, without stepping, when the run would pass the cycle
    /// bound.
    pub fn run(&mut self, inputs_per_cycle: &[CycleInputs]) -> Result<(), SimError> {
        if self.cycle + inputs_per_cycle.len() as u64 > self.max_cycles {
            return Err(SimError::CycleLimit {
                max_cycles: self.max_cycles,
            });
        }
        for inputs in inputs_per_cycle {
            self.step(inputs)?;
        }
        Ok(())
    }

    /// The value a named wire had in the last evaluated cycle.
    pub fn value(&self, name: &str) -> Result<BigUint, SimError> {
        self.block
            .wire_by_name(name)
            .and_then(|id| self.values.get(&id))
            .cloned()
            .ok_or_else(|| SimError::UnknownWire {
                name: name.to_string(),
            })
    }

    /// The value of a wire by ID in the last evaluated cycle.
    pub fn value_of(&self, id: WireId) -> Option<&BigUint> {
        self.values.get(&id)
    }

    /// Values of a named input, output or register, one per cycle stepped.
    pub fn trace(&self, name: &str) -> Option<&[BigUint]> {
        self.trace.get(name).map(Vec::as_slice)
    }

    /// Number of cycles stepped so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    fn width(&self, id: WireId) -> Result<u32, SimError> {
        self.block.width(id).map_err(|_| SimError::UnresolvedWidth {
            name: self.block.name(id).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitloom_netlist::NetlistResult;

    fn inputs(pairs: &[(&str, u32)]) -> CycleInputs {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), BigUint::from(*v)))
            .collect()
    }

    fn adder() -> NetlistResult<Block> {
        let mut b = Block::new();
        let a = b.input(Some(4), Some("a"))?;
        let c = b.input(Some(4), Some("c"))?;
        let o = b.output(None, Some("sum"))?;
        let s = b.add(a, c)?;
        b.assign(o, s)?;
        Ok(b)
    }

    #[test]
    fn combinational_adder() {
        let b = adder().unwrap();
        let mut sim = Simulation::new(&b).unwrap();
        sim.step(&inputs(&[("a", 15), ("c", 1)])).unwrap();
        assert_eq!(sim.value("sum").unwrap(), BigUint::from(16u32));
    }

    #[test]
    fn missing_and_unknown_inputs() {
        let b = adder().unwrap();
        let mut sim = Simulation::new(&b).unwrap();
        assert_eq!(
            sim.step(&inputs(&[("a", 1)])).unwrap_err(),
            SimError::MissingInput { name: "c".into() }
        );
        assert_eq!(
            sim.step(&inputs(&[("a", 1), ("c", 1), ("zz", 0)])).unwrap_err(),
            SimError::UnknownWire { name: "zz".into() }
        );
        assert!(matches!(
            sim.step(&inputs(&[("a", 16), ("c", 1)])).unwrap_err(),
            SimError::InputTooWide { bitwidth: 4, .. }
        ));
    }

    #[test]
    fn counter_latches_each_cycle() {
        let mut b = Block::new();
        let r = b.register(Some(3), Some("count")).unwrap();
        let inc = b.add(r, 1).unwrap();
        let wrapped = b.select(inc, 0..3).unwrap();
        b.stage_next(r, wrapped).unwrap();

        let mut sim = Simulation::new(&b).unwrap();
        sim.run(&vec![CycleInputs::new(); 10]).unwrap();
        let seen: Vec<u32> = sim
            .trace("count")
            .unwrap()
            .iter()
            .map(|v| u32::try_from(v).unwrap())
            .collect();
        assert_eq!(seen, vec![0, 1, 2, 3, 4, 5, 6, 7, 0, 1]);
    }

    #[test]
    fn failed_latch_keeps_all_registers() {
        let mut b = Block::new();
        let first = b.register(Some(2), Some("first")).unwrap();
        let second = b.register(Some(2), Some("second")).unwrap();
        let floating = b.wire_vector(Some(2), Some("floating")).unwrap();
        b.stage_next(first, 3).unwrap();
        b.stage_next(second, floating).unwrap();

        let mut sim = Simulation::new(&b).unwrap();
        assert_eq!(
            sim.step(&CycleInputs::new()).unwrap_err(),
            SimError::Undriven {
                name: "floating".into()
            }
        );
        assert_eq!(sim.state[&first], BigUint::zero());
        assert_eq!(sim.state[&second], BigUint::zero());
        assert_eq!(sim.cycle(), 0);
    }

    #[test]
    fn loop_is_rejected() {
        let mut b = Block::new();
        let w = b.wire_vector(Some(1), Some("w")).unwrap();
        let n = b.invert(w).unwrap();
        b.assign(w, n).unwrap();
        assert!(matches!(
            Simulation::new(&b).unwrap_err(),
            SimError::CombinationalLoop { .. }
        ));
    }

    #[test]
    fn unresolved_width_is_rejected() {
        let mut b = Block::new();
        b.wire_vector(None, Some("floating")).unwrap();
        assert_eq!(
            Simulation::new(&b).unwrap_err(),
            SimError::UnresolvedWidth {
                name: "floating".into()
            }
        );
    }

    #[test]
    fn cycle_bound() {
        let b = Block::new();
        let config = SimConfig { max_cycles: 2 };
        let mut sim = Simulation::with_config(&b, &config).unwrap();
        assert_eq!(
            sim.run(&vec![CycleInputs::new(); 3]).unwrap_err(),
            SimError::CycleLimit { max_cycles: 2 }
        );
        assert_eq!(sim.cycle(), 0);
        sim.run(&vec![CycleInputs::new(); 2]).unwrap();
        assert!(sim.step(&CycleInputs::new()).is_err());
    }
}
