use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_defaults_are_valid() {
    let config = VmConfig::default();
    assert_eq!(config.stack_capacity, 2048);
    assert_eq!(config.frame_capacity, 1024);
    assert_eq!(config.globals_capacity, 0x4000);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_zero_sizes_are_rejected() {
    let config = VmConfig {
        stack_capacity: 0,
        ..VmConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::Zero("stack capacity")));

    let config = VmConfig {
        frame_capacity: 0,
        ..VmConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::Zero("frame capacity")));

    let config = VmConfig {
        instruction_budget: Some(0),
        ..VmConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_globals_capacity_is_bounded_by_encoding() {
    let config = VmConfig {
        globals_capacity: 0x4001,
        ..VmConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::TooManyGlobals(0x4001)));
    assert_eq!(
        ConfigError::TooManyGlobals(0x4001).to_string(),
        "globals capacity 16385 exceeds the encodable maximum of 16384"
    );
}
