/// Prefix used for config and data directories
pub const PREFIX: &str = "onetouchd";
/// System config directory that takes precedence over shipped defaults
pub const SYSTEM_CONFIG_DIR: &str = "/etc/onetouchd";
