//! Shared foundational types used across the bitloom workspace.
//!
//! Currently this is the name interner: every wire in a netlist carries an
//! interned [`Ident`] rather than an owned string.

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner};
