//! # Whitelist Module
//!
//! Data structures, serialization and read-back for `Whitelist.json`, the file
//! consumed by the shelf placement system.
//!
//! ## Key Components
//!
//! - `types.rs`: document structures with the exact external key names
//! - `reader.rs`: section-by-section loading of an existing whitelist
//!
//! ## Document Structure
//!
//! ```json
//! {
//!   "Whitelist": {
//!     "Shelves": [
//!       { "Name": "BP_ShelfMain_001", "Repeat": 2, "Scale": 1.0,
//!         "Shelfbase": [0.09, 0.31], "Shelfoffset": [0.035, 0.02], "id": 0 }
//!     ],
//!     "Products": [
//!       { "GroupName": "chips_can_lays", "ShelfName": "BP_ShelfMain_002",
//!         "Repeat": [1, 2, 7], "Scale": 1.0, "Discard": false,
//!         "Description": "Green can",
//!         "Members": [ { "id": 1, "Name": "chips_can_lays_001", "Scale": 1.0 } ] }
//!     ]
//!   }
//! }
//! ```
//!
//! ## Writing
//!
//! The document is written to a temporary file next to the destination and
//! renamed into place, so a failed run never leaves a truncated whitelist.

pub mod reader;
pub mod types;

pub use reader::{load_whitelist, parse_whitelist, ReaderError};
pub use types::{
    ProductGroupInstance, ProductMember, ShelfInstance, WhitelistDocument, WhitelistFile,
    WhitelistSummary,
};

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{debug, info};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Borrowed twin of `WhitelistFile` for the write path
#[derive(Serialize)]
struct WhitelistFileRef<'a> {
    #[serde(rename = "Whitelist")]
    whitelist: &'a WhitelistDocument,
}

/// Serialize a document under the top-level `Whitelist` key
pub fn serialize_whitelist(document: &WhitelistDocument, pretty: bool) -> serde_json::Result<String> {
    let file = WhitelistFileRef { whitelist: document };
    if pretty {
        serde_json::to_string_pretty(&file)
    } else {
        serde_json::to_string(&file)
    }
}

/// Serialize and write a document, replacing `output_path` atomically
pub fn write_whitelist(document: &WhitelistDocument, output_path: &Path, pretty: bool) -> Result<()> {
    let json = serialize_whitelist(document, pretty).wrap_err("Failed to serialize whitelist")?;

    let dir = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).wrap_err_with(|| {
        format!("Failed to create temporary file in '{}'", dir.display())
    })?;
    temp_file
        .write_all(json.as_bytes())
        .wrap_err_with(|| format!("Failed to write whitelist for '{}'", output_path.display()))?;
    temp_file
        .as_file()
        .sync_all()
        .wrap_err_with(|| format!("Failed to flush whitelist for '{}'", output_path.display()))?;
    debug!("Wrote {} bytes to {:?}", json.len(), temp_file.path());

    temp_file
        .persist(output_path)
        .map_err(|e| e.error)
        .wrap_err_with(|| format!("Failed to write whitelist to '{}'", output_path.display()))?;

    info!("Whitelist written to {:?}", output_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemberSelector;
    use serde_json::Value;
    use tempfile::TempDir;

    fn sample_document() -> WhitelistDocument {
        WhitelistDocument {
            shelves: vec![ShelfInstance {
                name: "BP_ShelfMain_001".to_string(),
                repeat: 1,
                scale: 1.0,
                shelf_base: vec![0.0946, 0.315],
                shelf_offset: vec![0.035, 0.02],
                id: 0,
            }],
            products: vec![
                ProductGroupInstance {
                    group_name: "chips_lays".to_string(),
                    shelf_name: "BP_ShelfMain_001".to_string(),
                    repeat: MemberSelector::Count(2),
                    scale: 1.0,
                    discard: false,
                    description: None,
                    members: vec![
                        ProductMember { id: 1, name: "chips_lays_001".to_string(), scale: 1.0 },
                        ProductMember { id: 2, name: "chips_lays_002".to_string(), scale: 1.0 },
                    ],
                },
                ProductGroupInstance {
                    group_name: "chips_can_lays".to_string(),
                    shelf_name: "BP_ShelfMain_001".to_string(),
                    repeat: MemberSelector::Explicit(vec![7, 3]),
                    scale: 0.9,
                    discard: true,
                    description: Some("Yellow can".to_string()),
                    members: vec![
                        ProductMember { id: 7, name: "chips_can_lays_007".to_string(), scale: 0.9 },
                        ProductMember { id: 3, name: "chips_can_lays_003".to_string(), scale: 0.9 },
                    ],
                },
            ],
        }
    }

    #[test]
    fn test_serialized_key_names() {
        let json = serialize_whitelist(&sample_document(), false).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        let root = value.as_object().unwrap();
        assert_eq!(root.len(), 1);
        let whitelist = root["Whitelist"].as_object().unwrap();
        let mut keys: Vec<&String> = whitelist.keys().collect();
        keys.sort();
        assert_eq!(keys, vec!["Products", "Shelves"]);

        let shelf = &whitelist["Shelves"][0];
        assert_eq!(shelf["Name"], "BP_ShelfMain_001");
        assert_eq!(shelf["Repeat"], 1);
        assert_eq!(shelf["Scale"], 1.0);
        assert_eq!(shelf["Shelfbase"][1], 0.315);
        assert_eq!(shelf["Shelfoffset"][0], 0.035);
        assert_eq!(shelf["id"], 0);
        assert!(shelf.get("Id").is_none());

        let counted = &whitelist["Products"][0];
        assert_eq!(counted["GroupName"], "chips_lays");
        assert_eq!(counted["ShelfName"], "BP_ShelfMain_001");
        assert_eq!(counted["Repeat"], 2);
        assert_eq!(counted["Discard"], false);
        assert!(counted.get("Description").is_none());
        assert_eq!(counted["Members"][1]["id"], 2);
        assert_eq!(counted["Members"][1]["Name"], "chips_lays_002");
        assert_eq!(counted["Members"][1]["Scale"], 1.0);

        let explicit = &whitelist["Products"][1];
        assert_eq!(explicit["Repeat"], serde_json::json!([7, 3]));
        assert_eq!(explicit["Description"], "Yellow can");
        assert_eq!(explicit["Discard"], true);
    }

    #[test]
    fn test_borrowed_wrapper_matches_owned() {
        let document = sample_document();
        let owned = WhitelistFile {
            whitelist: document.clone(),
        };
        assert_eq!(
            serialize_whitelist(&document, false).unwrap(),
            serde_json::to_string(&owned).unwrap()
        );
        assert_eq!(
            serialize_whitelist(&document, true).unwrap(),
            serde_json::to_string_pretty(&owned).unwrap()
        );
    }

    #[test]
    fn test_round_trip() {
        let document = sample_document();
        for pretty in [true, false] {
            let json = serialize_whitelist(&document, pretty).unwrap();
            let parsed: WhitelistFile = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed.whitelist, document);

            let reserialized = serialize_whitelist(&parsed.whitelist, pretty).unwrap();
            let a: Value = serde_json::from_str(&json).unwrap();
            let b: Value = serde_json::from_str(&reserialized).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_write_whitelist() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Whitelist.json");

        write_whitelist(&sample_document(), &path, true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: WhitelistFile = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.whitelist, sample_document());

        // Only the destination remains in the directory
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_write_whitelist_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Whitelist.json");
        std::fs::write(&path, "stale").unwrap();

        write_whitelist(&sample_document(), &path, false).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("{\"Whitelist\""));
    }

    #[test]
    fn test_write_whitelist_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("Whitelist.json");

        let err = write_whitelist(&sample_document(), &path, true).unwrap_err();
        assert!(format!("{:?}", err).contains("missing"));
        assert!(!path.exists());
    }
}
