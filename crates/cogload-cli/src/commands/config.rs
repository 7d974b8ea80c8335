//! `config` subcommand: inspect and edit `~/.config/cogload/config.toml`.
//!
//! Keys are dot paths. Besides `scoring.validate_order`, every weight in the
//! table can be overridden as `weights.<category>.<label>`.

use clap::Subcommand;
use cogload_core::{Config, WeightCategory};

const KEYS_HELP: &str = "\
Keys:
  scoring.validate_order        true | false
  weights.<category>.<label>    override one weight table entry

Weight categories (labels as listed by `cogload-cli weights`):
  complexity, type_scalar, role, emotional, topic_change, gap, social
                                0.0 ..= 1.0
  time_of_day                   >= 0.0 (recovery multiplier)";

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value; weights without an override show the built-in value
    #[command(after_help = KEYS_HELP)]
    Get {
        /// Dot-path key, e.g. "scoring.validate_order" or "weights.role.presenter"
        key: String,
    },
    /// Change one value and save the config file
    #[command(after_help = KEYS_HELP)]
    Set {
        /// Dot-path key
        key: String,
        /// New value; weights are validated against their category's range
        value: String,
    },
    /// Print the config file contents as TOML
    List,
    /// Drop every override and restore defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = match config.get(&key) {
                Some(value) => value,
                None => effective_weight(&config, &key)?
                    .ok_or_else(|| format!("unknown key: {key}"))?,
            };
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

/// Resolve `weights.<category>.<label>` against the effective weight table.
fn effective_weight(
    config: &Config,
    key: &str,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let Some((category, raw)) = key
        .strip_prefix("weights.")
        .and_then(|rest| rest.split_once('.'))
    else {
        return Ok(None);
    };
    let Some(category) = WeightCategory::parse(category) else {
        return Ok(None);
    };
    let Some(label) = category.canonical_label(raw) else {
        return Ok(None);
    };
    let table = config.weight_table()?;
    Ok(Some(table.lookup(category, &label).to_string()))
}
