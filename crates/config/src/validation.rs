//! Configuration validation
//!
//! Validates config consistency:
//! - Map names are present and unique
//! - Every enabled map has sources with unique names
//! - `list` sources carry a label; `map` sources do not
//! - Per-source outputs only on push maps, never overwriting a map
//! - At least one map is enabled

use std::collections::HashSet;

use crate::error::{ConfigError, Result};
use crate::{Config, MapConfig, MergeStrategy, SourceType};

/// Validate the entire configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_map_names(config)?;
    for map in config.maps.iter().filter(|m| m.enabled) {
        validate_sources(map)?;
    }
    validate_outputs(config)?;

    if config.enabled_maps().next().is_none() {
        return Err(ConfigError::NoMapsEnabled);
    }
    Ok(())
}

fn validate_map_names(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, map) in config.maps.iter().enumerate() {
        if map.name.is_empty() {
            return Err(ConfigError::missing_field("map", format!("#{index}"), "name"));
        }
        if !seen.insert(map.name.as_str()) {
            return Err(ConfigError::DuplicateMap(map.name.clone()));
        }
    }
    Ok(())
}

fn validate_sources(map: &MapConfig) -> Result<()> {
    if map.sources.is_empty() {
        return Err(ConfigError::invalid_value(
            "map",
            &map.name,
            "sources",
            "at least one source is required",
        ));
    }

    let mut seen = HashSet::new();
    for source in &map.sources {
        if source.name.is_empty() {
            return Err(ConfigError::missing_field("source", &map.name, "name"));
        }
        if !seen.insert(source.name.as_str()) {
            return Err(ConfigError::duplicate_source(&map.name, &source.name));
        }
        if source.path.as_os_str().is_empty() {
            return Err(ConfigError::missing_field("source", &source.name, "path"));
        }

        match (source.source_type, source.label.as_deref()) {
            (SourceType::List, None | Some("")) => {
                return Err(ConfigError::missing_field("source", &source.name, "label"));
            }
            (SourceType::Map, Some(_)) => {
                return Err(ConfigError::invalid_value(
                    "source",
                    &source.name,
                    "label",
                    "only list sources take a label",
                ));
            }
            _ => {}
        }

        if source.output.is_some() && map.merge != MergeStrategy::Push {
            return Err(ConfigError::invalid_value(
                "source",
                &source.name,
                "output",
                "per-source outputs require merge = \"push\"",
            ));
        }
    }
    Ok(())
}

/// Every output file name must be unique across maps and source outputs
fn validate_outputs(config: &Config) -> Result<()> {
    let mut taken: HashSet<&str> = config.enabled_maps().map(|m| m.name.as_str()).collect();

    for map in config.enabled_maps() {
        for source in &map.sources {
            if let Some(output) = source.output.as_deref()
                && !taken.insert(output)
            {
                return Err(ConfigError::output_collision(&source.name, output));
            }
        }
    }
    Ok(())
}
