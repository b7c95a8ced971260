//! `bdw config` -- list, get and set settings in `.beads/config.yaml`.

use anyhow::{Context, Result, bail};
use beads_config::{ConfigError, WaveToolConfig, set_config_value};

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `bdw config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::List => {
            let entries = entries(&ctx.config);
            if ctx.json {
                let map: serde_json::Map<String, serde_json::Value> = entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v)))
                    .collect();
                output_json(&map);
            } else {
                for (key, value) in entries {
                    println!("{} = {}", key, value);
                }
            }
        }

        ConfigCommands::Get(get_args) => {
            let Some(value) = ctx.config.get(&get_args.key) else {
                bail!(
                    "unknown config key '{}' (expected one of: {})",
                    get_args.key,
                    WaveToolConfig::KEYS.join(", ")
                );
            };
            if ctx.json {
                output_json(&serde_json::json!({
                    "key": get_args.key,
                    "value": value,
                }));
            } else {
                println!("{}", value);
            }
        }

        ConfigCommands::Set(set_args) => {
            let beads_dir = ctx
                .beads_dir
                .as_deref()
                .ok_or(ConfigError::BeadsDirNotFound)?;
            set_config_value(beads_dir, &set_args.key, &set_args.value).with_context(|| {
                format!("failed to update config in {}", beads_dir.display())
            })?;

            if ctx.json {
                output_json(&serde_json::json!({
                    "key": set_args.key,
                    "value": set_args.value,
                }));
            } else if !ctx.quiet {
                println!("Set {} = {}", set_args.key, set_args.value);
            }
        }
    }

    Ok(())
}

fn entries(config: &WaveToolConfig) -> Vec<(&'static str, String)> {
    WaveToolConfig::KEYS
        .iter()
        .filter_map(|key| config.get(key).map(|value| (*key, value)))
        .collect()
}
