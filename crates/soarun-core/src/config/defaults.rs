//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "soarun.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "soarun.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".soarun.toml",
        ".soarun.yaml",
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# soarun configuration
# Values here are defaults; command-line flags take precedence.

# install_dir = "/opt/parasoft/soatest"
# workspace = "soatest-workspace"
# test_config = "builtin://Demo Configuration"
# resource = "TestAssets"
# settings = "localsettings.properties"
report = "reports"
# report_format = "xml"
# environment = "staging"
# additional_params = "-showdetails"
# java_root_path = "/usr/lib/jvm/java-17"
convert_report = true
# timeout_secs = 3600
# assets_dir = "/opt/soarun/share"
"#;
