//! Whitelist generation orchestrator.
//!
//! This module coordinates the overall generation process, managing the flow
//! from a validated configuration through expansion, consistency checks and
//! the final write.

use crate::builder::build_whitelist;
use crate::config::Config;
use crate::utils::validation::{duplicate_member_names, validate_member_uniqueness, validate_shelf_references};
use crate::whitelist::{write_whitelist, WhitelistSummary};
use log::{info, warn};
use std::path::Path;

/// Build the whitelist described by `config` and write it to `output_path`
///
/// Unknown shelf references and colliding member names are logged but never
/// stop the write; only build and I/O failures are errors.
pub fn generate_whitelist(config: &Config, output_path: &Path) -> color_eyre::eyre::Result<WhitelistSummary> {
    let document = build_whitelist(config)?;

    validate_shelf_references(&document.shelves, &config.products);
    if validate_member_uniqueness(&config.products) > 0 {
        let duplicates = duplicate_member_names(&config.products);
        warn!(
            "{} member names will appear more than once: {}",
            duplicates.len(),
            duplicates.join(", ")
        );
    }

    write_whitelist(&document, output_path, config.general.pretty())?;

    let summary = document.summary();
    info!("Generated whitelist: {}", summary);

    Ok(summary)
}
