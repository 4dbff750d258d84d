use std::error::Error;

use crate::{
    config::{Config, LoadError},
    drivers::onetouch::filter::Point,
};

const DEFAULT_CONFIG_FILE: &str = "./rootfs/usr/share/onetouchd/config.yaml";

#[test]
fn test_empty_config_uses_defaults() -> Result<(), Box<dyn Error>> {
    let config = Config::from_yaml("{}".to_string())?;
    assert_eq!(config, Config::default());
    assert_eq!(config.filter.discard_start, 4);
    assert_eq!(config.filter.avg_count, 6);
    assert_eq!(config.filter.discard_end, 4);
    assert_eq!(config.target.height, 1280);
    assert_eq!(config.target.width, 1024);
    assert!(config.calibration.is_none());

    Ok(())
}

#[test]
fn test_partial_config() -> Result<(), Box<dyn Error>> {
    let yaml = r#"
device: /dev/ttyUSB0
filter:
  avg_count: 8
target:
  width: 768
calibration:
  min: { x: 100.0, y: 120.0 }
  max: { x: 900.0, y: 880.0 }
"#;
    let config = Config::from_yaml(yaml.to_string())?;
    assert_eq!(config.device, "/dev/ttyUSB0");
    assert_eq!(config.filter.avg_count, 8);
    assert_eq!(config.filter.discard_start, 4);
    assert_eq!(config.target.height, 1280);
    assert_eq!(config.target.width, 768);

    let bounds = config.calibration.ok_or("calibration should be set")?;
    assert_eq!(bounds.min, Some(Point::new(100.0, 120.0)));
    assert_eq!(bounds.max, Some(Point::new(900.0, 880.0)));

    Ok(())
}

#[test]
fn test_rejects_zero_average() {
    let result = Config::from_yaml("filter: { avg_count: 0 }".to_string());
    assert!(matches!(result, Err(LoadError::Invalid(_))));
}

#[test]
fn test_rejects_inverted_calibration() {
    let yaml = "calibration: { min: { x: 900.0, y: 0.0 }, max: { x: 100.0, y: 10.0 } }";
    let result = Config::from_yaml(yaml.to_string());
    assert!(matches!(result, Err(LoadError::Invalid(_))));
}

#[test]
fn test_rejects_malformed_yaml() {
    let result = Config::from_yaml("filter: [1, 2".to_string());
    assert!(matches!(result, Err(LoadError::DeserializeError(_))));
}

/// The shipped config file must load and match the built-in defaults
#[test]
fn test_default_config_file() -> Result<(), Box<dyn Error>> {
    let config = Config::from_yaml_file(DEFAULT_CONFIG_FILE)?;
    assert_eq!(config, Config::default());

    Ok(())
}
