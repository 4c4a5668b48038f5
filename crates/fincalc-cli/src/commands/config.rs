//! Config command implementation.
//!
//! Manages CLI configuration settings.

use anyhow::Result;
use clap::{Args, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fincalc_formulas::{BracketPolicy, IrrConfig};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_info, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// List available configuration keys
    List,

    /// Reset configuration to defaults
    Reset(ResetArgs),

    /// Show configuration file location
    Path,
}

/// Arguments for get subcommand.
#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

/// Arguments for set subcommand.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

/// Arguments for reset subcommand.
#[derive(Args, Debug)]
pub struct ResetArgs {
    /// Reset all settings (not just one)
    #[arg(long)]
    pub all: bool,

    /// Specific key to reset (optional)
    pub key: Option<String>,
}

/// CLI configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// Default output format
    DefaultFormat,
    /// Decimal places for results, or `auto` for the category default
    DecimalPrecision,
    /// Whether to use colors
    UseColors,
    /// Lower end of the IRR search interval
    IrrLower,
    /// Upper end of the IRR search interval
    IrrUpper,
    /// IRR NPV tolerance
    IrrTolerance,
    /// IRR iteration cap
    IrrMaxIterations,
    /// Whether IRR checks for a sign change first
    IrrVerifyBracket,
}

impl ConfigKey {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "default_format" | "format" => Some(Self::DefaultFormat),
            "decimal_precision" | "precision" => Some(Self::DecimalPrecision),
            "use_colors" | "colors" => Some(Self::UseColors),
            "irr_lower" => Some(Self::IrrLower),
            "irr_upper" => Some(Self::IrrUpper),
            "irr_tolerance" => Some(Self::IrrTolerance),
            "irr_max_iterations" => Some(Self::IrrMaxIterations),
            "irr_verify_bracket" => Some(Self::IrrVerifyBracket),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::DefaultFormat => "default_format",
            Self::DecimalPrecision => "decimal_precision",
            Self::UseColors => "use_colors",
            Self::IrrLower => "irr_lower",
            Self::IrrUpper => "irr_upper",
            Self::IrrTolerance => "irr_tolerance",
            Self::IrrMaxIterations => "irr_max_iterations",
            Self::IrrVerifyBracket => "irr_verify_bracket",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DecimalPrecision => "Decimal places for results (auto, or 0-10)",
            Self::UseColors => "Enable colored output (true, false)",
            Self::IrrLower => "Lowest rate the IRR search tries (greater than -1)",
            Self::IrrUpper => "Highest rate the IRR search tries",
            Self::IrrTolerance => "IRR stops when |NPV| is below this amount",
            Self::IrrMaxIterations => "Maximum IRR bisection steps",
            Self::IrrVerifyBracket => "Require NPV to change sign over the IRR interval (true, false)",
        }
    }

    fn default_value(self) -> &'static str {
        match self {
            Self::DefaultFormat => "table",
            Self::DecimalPrecision => "auto",
            Self::UseColors => "true",
            Self::IrrVerifyBracket => "false",
            Self::IrrLower => "-0.99",
            Self::IrrUpper => "2.0",
            Self::IrrTolerance => "0.0001",
            Self::IrrMaxIterations => "1000",
        }
    }

    fn all() -> &'static [Self] {
        &[
            Self::DefaultFormat,
            Self::DecimalPrecision,
            Self::UseColors,
            Self::IrrLower,
            Self::IrrUpper,
            Self::IrrTolerance,
            Self::IrrMaxIterations,
            Self::IrrVerifyBracket,
        ]
    }
}

/// Stored settings, read from a JSON file of string values.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(flatten)]
    values: BTreeMap<String, String>,
}

impl Config {
    /// Loads settings from `path`, or defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_json::from_str(&content).map_err(|e| {
                CliError::Config(format!("{} is not valid JSON: {e}", path.display())).into()
            })
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn value(&self, key: ConfigKey) -> &str {
        self.values
            .get(key.as_str())
            .map_or(key.default_value(), String::as_str)
    }

    fn set(&mut self, key: ConfigKey, value: String) {
        self.values.insert(key.as_str().to_string(), value);
    }

    fn remove(&mut self, key: ConfigKey) {
        self.values.remove(key.as_str());
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    /// Configured output format.
    pub fn format(&self) -> CliResult<OutputFormat> {
        let value = self.value(ConfigKey::DefaultFormat);
        OutputFormat::from_name(value)
            .ok_or_else(|| CliError::Config(format!("invalid default_format '{value}'")))
    }

    /// Configured precision, `None` for the category default.
    pub fn precision(&self) -> CliResult<Option<usize>> {
        parse_precision(self.value(ConfigKey::DecimalPrecision))
    }

    /// Whether colored output is enabled.
    pub fn use_colors(&self) -> CliResult<bool> {
        parse_bool(ConfigKey::UseColors, self.value(ConfigKey::UseColors))
    }

    /// IRR settings assembled from the `irr_*` keys.
    pub fn irr_config(&self) -> CliResult<IrrConfig> {
        let number = |key: ConfigKey| -> CliResult<f64> {
            let value = self.value(key);
            value
                .parse::<f64>()
                .map_err(|_| CliError::Config(format!("invalid {} '{value}'", key.as_str())))
        };
        let max_iterations = {
            let value = self.value(ConfigKey::IrrMaxIterations);
            value.parse::<u32>().map_err(|_| {
                CliError::Config(format!("invalid irr_max_iterations '{value}'"))
            })?
        };
        let policy = if parse_bool(
            ConfigKey::IrrVerifyBracket,
            self.value(ConfigKey::IrrVerifyBracket),
        )? {
            BracketPolicy::Verify
        } else {
            BracketPolicy::Assume
        };

        let config = IrrConfig::default()
            .with_bracket(number(ConfigKey::IrrLower)?, number(ConfigKey::IrrUpper)?)
            .with_tolerance(number(ConfigKey::IrrTolerance)?)
            .with_max_iterations(max_iterations)
            .with_bracket_policy(policy);
        config
            .validate()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok(config)
    }
}

fn parse_precision(value: &str) -> CliResult<Option<usize>> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    match value.parse::<usize>() {
        Ok(precision) if precision <= 10 => Ok(Some(precision)),
        _ => Err(CliError::Config(format!(
            "invalid decimal_precision '{value}', use auto or 0-10"
        ))),
    }
}

fn parse_bool(key: ConfigKey, value: &str) -> CliResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(CliError::Config(format!(
            "invalid {} '{value}', use true or false",
            key.as_str()
        ))),
    }
}

/// Default config file path.
pub fn default_path() -> Result<PathBuf> {
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    Ok(home.join("fincalc").join("config.json"))
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Get(get_args) => execute_get(get_args, ctx),
        ConfigCommand::Set(set_args) => execute_set(set_args, ctx),
        ConfigCommand::List => execute_list(ctx.format),
        ConfigCommand::Reset(reset_args) => execute_reset(reset_args, ctx),
        ConfigCommand::Path => execute_path(&ctx.config_path),
    }
}

fn parse_key(key: &str) -> Result<ConfigKey> {
    ConfigKey::from_str(key).ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {key}"))
}

/// Show current configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = &ctx.config;

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let results: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| KeyValue::new(key.as_str(), config.value(*key)))
                .collect();
            if ctx.format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            crate::output::print_output(&results, ctx.format)?;
        }
        OutputFormat::Json => {
            let output: BTreeMap<_, _> = ConfigKey::all()
                .iter()
                .map(|key| (key.as_str(), config.value(*key)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}={}", key.as_str(), config.value(*key));
            }
        }
    }

    Ok(())
}

/// Get a configuration value.
fn execute_get(args: GetArgs, ctx: &Context) -> Result<()> {
    let key = parse_key(&args.key)?;
    let value = ctx.config.value(key);

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            println!("{}: {}", key.as_str(), value);
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "key": key.as_str(),
                "value": value
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Minimal => {
            println!("{}", value);
        }
    }

    Ok(())
}

/// Set a configuration value.
fn execute_set(args: SetArgs, ctx: &Context) -> Result<()> {
    let key = parse_key(&args.key)?;

    validate_config_value(key, &args.value)?;

    let mut config = Config::load(&ctx.config_path)?;
    config.set(key, args.value.clone());
    config.irr_config()?;
    config.save(&ctx.config_path)?;

    if !ctx.quiet {
        print_success(&format!("Set {} = {}", key.as_str(), args.value));
    }
    Ok(())
}

/// List available configuration keys.
fn execute_list(format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let results: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    KeyValue::new(
                        key.as_str(),
                        format!("{} (default: {})", key.description(), key.default_value()),
                    )
                })
                .collect();
            print_header("Available Configuration Keys");
            crate::output::print_output(&results, format)?;
        }
        OutputFormat::Json => {
            let output: Vec<_> = ConfigKey::all()
                .iter()
                .map(|key| {
                    serde_json::json!({
                        "key": key.as_str(),
                        "description": key.description(),
                        "default": key.default_value()
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.write_record(["key", "description", "default"])?;
            for key in ConfigKey::all() {
                wtr.write_record([key.as_str(), key.description(), key.default_value()])?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            for key in ConfigKey::all() {
                println!("{}", key.as_str());
            }
        }
    }

    Ok(())
}

/// Reset configuration.
fn execute_reset(args: ResetArgs, ctx: &Context) -> Result<()> {
    let mut config = Config::load(&ctx.config_path)?;

    if args.all {
        config.clear();
        config.save(&ctx.config_path)?;
        print_success("Reset all configuration to defaults");
    } else if let Some(key_str) = args.key {
        let key = parse_key(&key_str)?;
        config.remove(key);
        config.irr_config()?;
        config.save(&ctx.config_path)?;
        print_success(&format!(
            "Reset {} to default ({})",
            key.as_str(),
            key.default_value()
        ));
    } else {
        print_warning("Use --all to reset all settings, or specify a key to reset");
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(path: &Path) -> Result<()> {
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Validate a configuration value.
fn validate_config_value(key: ConfigKey, value: &str) -> CliResult<()> {
    match key {
        ConfigKey::DefaultFormat => {
            if OutputFormat::from_name(value).is_none() {
                return Err(CliError::Config(format!(
                    "Invalid format: {value}. Use table, json, csv, or minimal."
                )));
            }
        }
        ConfigKey::DecimalPrecision => {
            parse_precision(value)?;
        }
        ConfigKey::UseColors | ConfigKey::IrrVerifyBracket => {
            parse_bool(key, value)?;
        }
        ConfigKey::IrrLower | ConfigKey::IrrUpper | ConfigKey::IrrTolerance => {
            let number: f64 = value
                .parse()
                .map_err(|_| CliError::InvalidNumber(value.to_string()))?;
            if !number.is_finite() {
                return Err(CliError::Config(format!(
                    "{} must be a finite number",
                    key.as_str()
                )));
            }
            if key == ConfigKey::IrrLower && number <= -1.0 {
                return Err(CliError::Config("irr_lower must be greater than -1".into()));
            }
            if key == ConfigKey::IrrTolerance && number <= 0.0 {
                return Err(CliError::Config("irr_tolerance must be positive".into()));
            }
        }
        ConfigKey::IrrMaxIterations => match value.parse::<u32>() {
            Ok(n) if n > 0 => {}
            _ => {
                return Err(CliError::Config(format!(
                    "Invalid irr_max_iterations: {value}. Must be a positive whole number."
                )))
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.format().unwrap(), OutputFormat::Table);
        assert_eq!(config.precision().unwrap(), None);
        assert!(config.use_colors().unwrap());
        assert_eq!(config.irr_config().unwrap(), IrrConfig::default());
    }

    #[test]
    fn test_irr_settings() {
        let mut config = Config::default();
        config.set(ConfigKey::IrrUpper, "0.5".into());
        config.set(ConfigKey::IrrVerifyBracket, "yes".into());

        let irr = config.irr_config().unwrap();
        assert_eq!(irr.upper, 0.5);
        assert_eq!(irr.bracket_policy, BracketPolicy::Verify);
    }

    #[test]
    fn test_irr_bounds_must_stay_ordered() {
        let mut config = Config::default();
        config.set(ConfigKey::IrrLower, "3".into());
        assert!(matches!(config.irr_config(), Err(CliError::Config(_))));

        config.set(ConfigKey::IrrUpper, "5".into());
        assert_eq!(config.irr_config().unwrap().lower, 3.0);
    }

    #[test]
    fn test_key_aliases() {
        assert_eq!(ConfigKey::from_str("precision"), Some(ConfigKey::DecimalPrecision));
        assert_eq!(ConfigKey::from_str("IRR-LOWER"), Some(ConfigKey::IrrLower));
        assert_eq!(ConfigKey::from_str("currency"), None);
    }

    #[test]
    fn test_validation() {
        assert!(validate_config_value(ConfigKey::DecimalPrecision, "auto").is_ok());
        assert!(validate_config_value(ConfigKey::DecimalPrecision, "11").is_err());
        assert!(validate_config_value(ConfigKey::IrrLower, "-1").is_err());
        assert!(validate_config_value(ConfigKey::IrrTolerance, "0").is_err());
        assert!(validate_config_value(ConfigKey::IrrMaxIterations, "0").is_err());
        assert!(validate_config_value(ConfigKey::DefaultFormat, "yaml").is_err());
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.set(ConfigKey::DecimalPrecision, "3".into());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.precision().unwrap(), Some(3));
    }
}
