//! # Shelfgen - Whitelist generator for retail shelf placement
//!
//! This library expands declarative shelf and product group templates into
//! `Whitelist.json`, the fully enumerated list of shelf fixtures and product
//! models consumed by the shelf placement and rendering pipeline.
//!
//! ## Overview
//!
//! A configuration names a handful of shelf fixture types (with repeat counts
//! and shelf-level geometry) and product groups (with member counts or
//! explicit member lists, colour variant descriptions and scale factors).
//! Shelfgen numbers every shelf and every product member, synthesizes their
//! names, and writes one JSON document whose key names are a fixed contract
//! with the consuming system.
//!
//! ## Architecture
//!
//! - `config`: Configuration structures and validation
//! - `config_loader`: YAML loading, CLI overrides and the built-in configuration
//! - `builder`: Expansion of templates into enumerated instances
//! - `whitelist`: Output types, JSON serialization, atomic writes and read-back
//! - `utils`: Member span parsing and consistency checks
//! - `orchestrator`: End-to-end generation
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use shelfgen::{config_loader, orchestrator};
//! use std::path::Path;
//!
//! let config = config_loader::load_config(Path::new("chip_aisle.yaml"))?;
//! let summary = orchestrator::generate_whitelist(&config, Path::new("Whitelist.json"))?;
//! println!("{}", summary);
//! # Ok::<(), color_eyre::eyre::Error>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! general:
//!   output: "Whitelist.json"
//!   shuffle_members: false
//!
//! shelves:
//!   - name: "BP_ShelfMain"
//!     repeat_count: 2
//!     shelf_base_positions: [0.0946, 0.315, 0.520, 0.728, 0.894]
//!     shelf_offsets: [0.035, 0.02, 0.02, 0.02, 0.02]
//!
//! products:
//!   - group_name: "chips_lays"
//!     shelf_name: "BP_ShelfMain_002"
//!     members: 234
//!   - group_name: "chips_cyclone"
//!     shelf_name: "BP_ShelfMain_001"
//!     members: ["1-10", "57-66"]
//!     description: "Blue and white"
//! ```
//!
//! ## Error Handling
//!
//! Malformed templates are rejected with a `ValidationError` naming the
//! template. Public entry points return `color_eyre::eyre::Result` so that I/O
//! failures carry the offending path.

pub mod builder;
pub mod config;
pub mod config_loader;
pub mod orchestrator;
pub mod utils;
pub mod whitelist;
