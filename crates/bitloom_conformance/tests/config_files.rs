//! Loading `bitloom.toml` from disk and applying it to a block.

use std::fs;

use bitloom_config::{load_config, ConfigError, CONFIG_FILE_NAME};
use bitloom_netlist::Block;
use bitloom_sim::{CycleInputs, SimError, Simulation};

#[test]
fn config_file_drives_block_and_sim() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"
[naming]
temp_prefix = "n"

[sim]
max_cycles = 3
"#,
    )
    .unwrap();
    let config = load_config(dir.path()).unwrap();

    let mut b = Block::with_config(&config);
    let w = b.wire_vector(Some(1), None).unwrap();
    assert!(b.name(w).starts_with('n'));

    let mut sim = Simulation::with_config(&b, &config.sim).unwrap();
    assert_eq!(
        sim.run(&vec![CycleInputs::new(); 4]).unwrap_err(),
        SimError::CycleLimit { max_cycles: 3 }
    );
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[sim]\nmax_cycles = 0\n",
    )
    .unwrap();
    assert!(matches!(
        load_config(dir.path()),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn missing_config_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_config(dir.path()),
        Err(ConfigError::IoError(_))
    ));
}
