//! Simulation error types for the reference evaluator.
//!
//! Everything that can go wrong while ordering or stepping a block is a
//! variant of [`SimError`].

/// Errors that can occur during simulation setup or execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// Combinational nets form a cycle through the named wire.
    #[error("combinational loop through `{wire}`")]
    CombinationalLoop {
        /// A wire driven by a net on the cycle.
        wire: String,
    },

    /// An input was not given a value for the current cycle.
    #[error("no value supplied for input `{name}`")]
    MissingInput {
        /// The input wire name.
        name: String,
    },

    /// An input value does not fit the input's width.
    #[error("value {value} does not fit in the {bitwidth} bits of input `{name}`")]
    InputTooWide {
        /// The input wire name.
        name: String,
        /// The supplied value.
        value: String,
        /// Width of the input.
        bitwidth: u32,
    },

    /// A name does not refer to a wire, or not to one that takes a value.
    #[error("unknown wire `{name}`")]
    UnknownWire {
        /// The name that was looked up.
        name: String,
    },

    /// A wire in the block never had its width fixed.
    #[error("wire `{name}` has no resolved bitwidth")]
    UnresolvedWidth {
        /// The wire name.
        name: String,
    },

    /// A plain wire or output is read but nothing drives it.
    #[error("wire `{name}` is read but never driven")]
    Undriven {
        /// The wire name.
        name: String,
    },

    /// Stepping further would exceed the configured cycle bound.
    #[error("cycle limit exceeded: {max_cycles} cycles")]
    CycleLimit {
        /// The configured bound.
        max_cycles: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinational_loop_display() {
        let e = SimError::CombinationalLoop { wire: "tmp3".into() };
        assert_eq!(e.to_string(), "combinational loop through `tmp3`");
    }

    #[test]
    fn input_too_wide_display() {
        let e = SimError::InputTooWide {
            name: "a".into(),
            value: "16".into(),
            bitwidth: 4,
        };
        assert_eq!(e.to_string(), "value 16 does not fit in the 4 bits of input `a`");
    }

    #[test]
    fn cycle_limit_display() {
        let e = SimError::CycleLimit { max_cycles: 8 };
        assert_eq!(e.to_string(), "cycle limit exceeded: 8 cycles");
    }
}
