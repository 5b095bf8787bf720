//! Construction errors for the netlist builder.
//!
//! Every failure is raised before the offending call emits any net, so a
//! returned error never leaves a half-built node in the block. Each variant
//! belongs to one [`ErrorKind`].

/// The three families of construction failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad bitwidths: non-positive widths, shrinking extensions, values that
    /// do not fit, out-of-range selections.
    Dimension,
    /// Illegal use of a wire given its role.
    Misuse,
    /// Malformed literal text.
    Format,
}

/// Result alias used throughout the netlist crate.
pub type NetlistResult<T> = Result<T, NetlistError>;

/// Errors raised while describing a circuit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetlistError {
    // --- Dimension ---
    /// A wire was declared with a zero bitwidth.
    #[error("bitwidth of `{name}` must be >= 1, got {bitwidth}")]
    InvalidBitwidth {
        /// The wire (or literal) being declared.
        name: String,
        /// The rejected width.
        bitwidth: i64,
    },

    /// A literal string carried a negative width field.
    #[error("literal `{literal}` has negative bitwidth {bitwidth}")]
    NegativeWidth {
        /// The literal text.
        literal: String,
        /// The rejected width.
        bitwidth: i64,
    },

    /// A constant was given a negative value.
    #[error("constant {value} is negative, constants are unsigned")]
    NegativeConst {
        /// The rejected value, in decimal.
        value: String,
    },

    /// A constant value needs more bits than its declared width.
    #[error("constant {value} cannot fit in the specified {bitwidth} bits")]
    ConstOverflow {
        /// The rejected value, in decimal.
        value: String,
        /// The declared width.
        bitwidth: u32,
    },

    /// An extension (or coercion) was asked to make a wire narrower.
    #[error("cannot shrink `{name}` from {from} to {to} bits by extension")]
    ShrinkExtension {
        /// The wire being extended.
        name: String,
        /// Its current width.
        from: u32,
        /// The requested, smaller width.
        to: u32,
    },

    /// A wire whose width is still pending was used where a width is needed.
    #[error("bitwidth of `{name}` is not yet known")]
    UnresolvedWidth {
        /// The wire with a pending width.
        name: String,
    },

    /// A bit index fell outside the wire.
    #[error("index {index} out of range for `{name}` of width {bitwidth}")]
    IndexOutOfRange {
        /// The wire being indexed.
        name: String,
        /// The offending index as written.
        index: i64,
        /// Width of the wire.
        bitwidth: u32,
    },

    /// A slice was written with a step of zero.
    #[error("slice step of zero selecting from `{name}`")]
    ZeroSliceStep {
        /// The wire being sliced.
        name: String,
    },

    /// A selection picked no bits at all.
    #[error("selection from `{name}` is empty")]
    EmptySelection {
        /// The wire being sliced.
        name: String,
    },

    /// `concat` was called with no parts.
    #[error("cannot concatenate zero wires")]
    EmptyConcat,

    /// A result width computed from `name` does not fit in 32 bits.
    #[error("result width derived from `{name}` does not fit in 32 bits")]
    WidthOverflow {
        /// The operand the width was derived from.
        name: String,
    },

    // --- Misuse ---
    /// Something tried to drive an `Input`.
    #[error("Input, such as `{name}`, cannot have values generated internally")]
    InputAssignment {
        /// The input wire.
        name: String,
    },

    /// Something tried to drive a `Const`.
    #[error("Const wires, such as `{name}`, can never be assigned to")]
    ConstAssignment {
        /// The constant wire.
        name: String,
    },

    /// A `Const` role was declared without a value.
    #[error("Const wire `{name}` must be created with a value")]
    ConstWithoutValue {
        /// The requested name.
        name: String,
    },

    /// A register was assigned directly instead of through its next value.
    #[error("cannot set register `{name}` directly, stage its next value instead")]
    RegisterDirectAssignment {
        /// The register.
        name: String,
    },

    /// A register's next value was staged a second time.
    #[error("next value of register `{name}` should be set once and only once")]
    RegisterRestaged {
        /// The register.
        name: String,
    },

    /// A next-value proxy was read as an ordinary operand.
    #[error("next value of register `{name}` can only be written, not read")]
    NextReadAsValue {
        /// The register the proxy belongs to.
        name: String,
    },

    /// Next-value staging was requested on a wire that is not a register.
    #[error("`{name}` is not a register and has no next value")]
    NotARegister {
        /// The wire.
        name: String,
    },

    /// A wire that already has a driver was assigned again.
    #[error("`{name}` already has a driver")]
    MultipleDrivers {
        /// The wire.
        name: String,
    },

    /// An `Output` was used as an operand while output reads are forbidden.
    #[error("Output `{name}` cannot be read inside the block")]
    OutputRead {
        /// The output wire.
        name: String,
    },

    /// A wire was requested as a compile-time boolean.
    #[error("cannot convert wire `{name}` to a compile-time boolean")]
    BooleanConversion {
        /// The wire.
        name: String,
    },

    /// A caller-supplied name is already in use in this block.
    #[error("name `{name}` is already used in this block")]
    DuplicateName {
        /// The clashing name.
        name: String,
    },

    /// A conditional scope was exited without a matching enter.
    #[error("conditional scope exited more times than it was entered")]
    UnbalancedConditional,

    /// A register reached the end of construction without a committed next value.
    #[error("register `{name}` has no committed next value")]
    IncompleteRegister {
        /// The register.
        name: String,
    },

    // --- Format ---
    /// A literal string could not be parsed.
    #[error("malformed literal `{literal}`: {reason}")]
    MalformedLiteral {
        /// The literal text.
        literal: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A bitwidth was passed alongside a literal string that already carries one.
    #[error("literal `{literal}` carries its own width, do not pass a bitwidth too")]
    LiteralWithBitwidth {
        /// The literal text.
        literal: String,
    },
}

impl NetlistError {
    /// Returns the error family this variant belongs to.
    pub fn kind(&self) -> ErrorKind {
        use NetlistError::*;
        match self {
            InvalidBitwidth { .. }
            | NegativeWidth { .. }
            | NegativeConst { .. }
            | ConstOverflow { .. }
            | ShrinkExtension { .. }
            | UnresolvedWidth { .. }
            | IndexOutOfRange { .. }
            | ZeroSliceStep { .. }
            | EmptySelection { .. }
            | EmptyConcat
            | WidthOverflow { .. } => ErrorKind::Dimension,
            InputAssignment { .. }
            | ConstAssignment { .. }
            | ConstWithoutValue { .. }
            | RegisterDirectAssignment { .. }
            | RegisterRestaged { .. }
            | NextReadAsValue { .. }
            | NotARegister { .. }
            | MultipleDrivers { .. }
            | OutputRead { .. }
            | BooleanConversion { .. }
            | DuplicateName { .. }
            | UnbalancedConditional
            | IncompleteRegister { .. } => ErrorKind::Misuse,
            MalformedLiteral { .. } | LiteralWithBitwidth { .. } => ErrorKind::Format,
        }
    }

    pub(crate) fn malformed(literal: &str, reason: impl Into<String>) -> Self {
        NetlistError::MalformedLiteral {
            literal: literal.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrink_display_names_wire_and_widths() {
        let e = NetlistError::ShrinkExtension {
            name: "acc".into(),
            from: 8,
            to: 4,
        };
        assert_eq!(e.to_string(), "cannot shrink `acc` from 8 to 4 bits by extension");
        assert_eq!(e.kind(), ErrorKind::Dimension);
    }

    #[test]
    fn const_overflow_display() {
        let e = NetlistError::ConstOverflow {
            value: "5".into(),
            bitwidth: 2,
        };
        assert_eq!(e.to_string(), "constant 5 cannot fit in the specified 2 bits");
    }

    #[test]
    fn misuse_kinds() {
        let errors = [
            NetlistError::InputAssignment { name: "a".into() },
            NetlistError::RegisterRestaged { name: "r".into() },
            NetlistError::NextReadAsValue { name: "r".into() },
            NetlistError::UnbalancedConditional,
        ];
        for e in errors {
            assert_eq!(e.kind(), ErrorKind::Misuse, "{e}");
        }
    }

    #[test]
    fn format_kind() {
        let e = NetlistError::malformed("8'q12", "unknown base");
        assert_eq!(e.kind(), ErrorKind::Format);
        assert_eq!(e.to_string(), "malformed literal `8'q12`: unknown base");
    }

    #[test]
    fn register_message_mentions_name() {
        let e = NetlistError::RegisterDirectAssignment { name: "count".into() };
        assert!(e.to_string().contains("`count`"));
    }
}
