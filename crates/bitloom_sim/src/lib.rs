//! Cycle-based reference evaluator for bitloom netlists.
//!
//! The simulator reads a finished [`Block`](bitloom_netlist::Block) and
//! evaluates it one clock cycle at a time with unsigned, width-masked
//! arithmetic. It exists to check that a netlist computes what its
//! construction calls describe.
//!
//! ```
//! use bitloom_netlist::Block;
//! use bitloom_sim::{CycleInputs, Simulation};
//! use num_bigint::BigUint;
//!
//! let mut b = Block::new();
//! let five = b.constant(5, Some(4)).unwrap();
//! let three = b.constant(3, Some(4)).unwrap();
//! let out = b.output(None, Some("out")).unwrap();
//! let sum = b.add(five, three).unwrap();
//! b.assign(out, sum).unwrap();
//!
//! let mut sim = Simulation::new(&b).unwrap();
//! sim.step(&CycleInputs::new()).unwrap();
//! assert_eq!(sim.value("out").unwrap(), BigUint::from(8u32));
//! ```
//!
//! # Modules
//!
//! - `error`: Simulation error types
//! - `evaluator`: Value semantics of a single net
//! - `kernel`: Net ordering and the cycle loop

#![warn(missing_docs)]

pub mod error;
pub mod evaluator;
pub mod kernel;

pub use error::SimError;
pub use evaluator::{eval_net, mask, SizedValue};
pub use kernel::{CycleInputs, Simulation};
