//! Conformance test helpers for bitloom.
//!
//! Provides small builders that describe a circuit, run it through the
//! reference evaluator and return plain integers for assertion in the
//! integration tests.

#![warn(missing_docs)]

use bitloom_config::{load_config_from_str, BuildConfig};
use bitloom_netlist::{Block, NetlistResult, Op, WireId};
use bitloom_sim::{CycleInputs, SimError, Simulation};
use num_bigint::BigUint;

/// Parses an inline `bitloom.toml`.
pub fn make_config(toml: &str) -> BuildConfig {
    load_config_from_str(toml).unwrap()
}

/// Builds cycle inputs from `(name, value)` pairs.
pub fn inputs(pairs: &[(&str, u64)]) -> CycleInputs {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), BigUint::from(*value)))
        .collect()
}

/// Drives a fresh output named `name` from `source` and returns it.
pub fn expose(b: &mut Block, name: &str, source: WireId) -> NetlistResult<WireId> {
    let out = b.output(None, Some(name))?;
    b.assign(out, source)?;
    Ok(out)
}

/// Evaluates one cycle and returns the value of `output`.
pub fn eval_once(b: &Block, output: &str, pairs: &[(&str, u64)]) -> Result<BigUint, SimError> {
    let mut sim = Simulation::new(b)?;
    sim.step(&inputs(pairs))?;
    sim.value(output)
}

/// Evaluates one cycle and returns the value of `output` as a `u64`.
///
/// # Panics
///
/// Panics if evaluation fails or the value does not fit.
pub fn eval_u64(b: &Block, output: &str, pairs: &[(&str, u64)]) -> u64 {
    let value = eval_once(b, output, pairs).unwrap();
    u64::try_from(&value).unwrap()
}

/// Counts the nets of a given op.
pub fn count_ops(b: &Block, op: Op) -> usize {
    b.nets().filter(|n| n.op == op).count()
}
