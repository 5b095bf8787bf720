//! Configuration types deserialized from `bitloom.toml`.

use serde::Deserialize;

/// The top-level build configuration parsed from `bitloom.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
    /// Name allocation for temporaries and constants.
    #[serde(default)]
    pub naming: NamingConfig,
    /// Construction-time checks.
    #[serde(default)]
    pub construction: ConstructionConfig,
    /// Reference evaluator bounds.
    #[serde(default)]
    pub sim: SimConfig,
}

/// Prefixes used when a wire is created without an explicit name.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct NamingConfig {
    /// Prefix for anonymous intermediate wires (`tmp0`, `tmp1`, ...).
    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,
    /// Prefix for constant wires (`const_0_5`, ...).
    #[serde(default = "default_const_prefix")]
    pub const_prefix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            temp_prefix: default_temp_prefix(),
            const_prefix: default_const_prefix(),
        }
    }
}

fn default_temp_prefix() -> String {
    "tmp".to_string()
}

fn default_const_prefix() -> String {
    "const".to_string()
}

/// Checks applied while a circuit is being described.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ConstructionConfig {
    /// Reject `Output` wires used as operands.
    #[serde(default)]
    pub forbid_output_reads: bool,
    /// Treat a register without a committed next value as an error when the
    /// build driver checks the finished block.
    #[serde(default = "default_true")]
    pub require_committed_registers: bool,
}

impl Default for ConstructionConfig {
    fn default() -> Self {
        Self {
            forbid_output_reads: false,
            require_committed_registers: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Bounds for the cycle-based reference evaluator.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SimConfig {
    /// Maximum number of cycles a single `run` may step.
    #[serde(default = "default_max_cycles")]
    pub max_cycles: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_cycles: default_max_cycles(),
        }
    }
}

fn default_max_cycles() -> u64 {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;

    #[test]
    fn empty_file_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config, BuildConfig::default());
        assert_eq!(config.naming.temp_prefix, "tmp");
        assert_eq!(config.naming.const_prefix, "const");
        assert!(!config.construction.forbid_output_reads);
        assert!(config.construction.require_committed_registers);
        assert_eq!(config.sim.max_cycles, 1024);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let toml = r#"
[naming]
temp_prefix = "w"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.naming.temp_prefix, "w");
        assert_eq!(config.naming.const_prefix, "const");
    }

    #[test]
    fn construction_flags() {
        let toml = r#"
[construction]
forbid_output_reads = true
require_committed_registers = false
"#;
        let config = load_config_from_str(toml).unwrap();
        assert!(config.construction.forbid_output_reads);
        assert!(!config.construction.require_committed_registers);
    }
}
