//! Read-only view of the effective weight table.

use cogload_core::{Config, WeightCategory};

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let table = config.weight_table()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    for category in WeightCategory::ALL {
        println!(
            "{} (default {:.2})",
            category.as_str(),
            category.default_weight()
        );
        for (label, weight) in table.entries(category) {
            println!("  {label:<16} {weight:.2}");
        }
    }
    Ok(())
}
