//! Whitelist read-back.
//!
//! Loads an existing whitelist the way the placement system does: the
//! `Whitelist` object first, then `Shelves`, then `Products`, with a distinct
//! error for each missing section.

use log::{debug, info};
use serde_json::Value;
use std::path::Path;

use super::types::WhitelistDocument;

/// Errors raised while reading a whitelist
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    #[error("Failed to read whitelist file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Whitelist file is empty")]
    Empty,
    #[error("Failed to parse whitelist JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Whitelist is missing the '{0}' section")]
    MissingSection(&'static str),
    #[error("Invalid {section} record: {source}")]
    Shape {
        section: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Read and parse a whitelist file
pub fn load_whitelist(path: &Path) -> Result<WhitelistDocument, ReaderError> {
    info!("Loading whitelist from: {:?}", path);
    let content = std::fs::read_to_string(path)?;
    parse_whitelist(&content)
}

/// Parse whitelist JSON text, checking each section in turn
pub fn parse_whitelist(content: &str) -> Result<WhitelistDocument, ReaderError> {
    if content.trim().is_empty() {
        return Err(ReaderError::Empty);
    }

    let mut root: Value = serde_json::from_str(content).map_err(ReaderError::Parse)?;

    let mut whitelist = root
        .get_mut("Whitelist")
        .filter(|v| v.is_object())
        .map(Value::take)
        .ok_or(ReaderError::MissingSection("Whitelist"))?;
    info!("Reading Whitelist...");

    let shelves = take_section(&mut whitelist, "Shelves")?;
    info!("Reading Shelves...");
    let shelves = serde_json::from_value(shelves).map_err(|source| ReaderError::Shape {
        section: "Shelves",
        source,
    })?;

    let products = take_section(&mut whitelist, "Products")?;
    info!("Reading Products...");
    let products = serde_json::from_value(products).map_err(|source| ReaderError::Shape {
        section: "Products",
        source,
    })?;

    let document = WhitelistDocument { shelves, products };
    log_document(&document);

    Ok(document)
}

fn take_section(whitelist: &mut Value, section: &'static str) -> Result<Value, ReaderError> {
    whitelist
        .get_mut(section)
        .filter(|v| v.is_array())
        .map(Value::take)
        .ok_or(ReaderError::MissingSection(section))
}

fn log_document(document: &WhitelistDocument) {
    for shelf in &document.shelves {
        debug!("Shelf: {} in Scale: {}", shelf.name, shelf.scale);
        for base in &shelf.shelf_base {
            debug!("Shelfbase: {}", base);
        }
    }
    for group in &document.products {
        debug!("Product Group: {}", group.group_name);
        for member in &group.members {
            debug!("Product Name: {} in Scale: {}", member.name, member.scale);
        }
    }

    info!(
        "Collected {} shelves and {} product groups",
        document.shelves.len(),
        document.products.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MemberSelector;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
  "Whitelist": {
    "Shelves": [
      { "Name": "BP_ShelfMain_001", "Repeat": 2, "Scale": 1.0,
        "Shelfbase": [0.0946, 0.315], "Shelfoffset": [0.035, 0.02], "id": 0 },
      { "Name": "BP_ShelfMain_002", "Repeat": 2, "Scale": 1.0,
        "Shelfbase": [0.0946, 0.315], "Shelfoffset": [0.035, 0.02], "id": 1 }
    ],
    "Products": [
      { "GroupName": "chips_can_lays", "ShelfName": "BP_ShelfMain_002",
        "Repeat": [3, 6], "Scale": 1.0, "Discard": false, "Description": "Yellow can",
        "Members": [
          { "id": 6, "Name": "chips_can_lays_006", "Scale": 1.0 },
          { "id": 3, "Name": "chips_can_lays_003", "Scale": 1.0 }
        ] },
      { "GroupName": "chips_box_lays", "ShelfName": "BP_ShelfMain_002",
        "Repeat": 1, "Scale": 1.0, "Discard": false,
        "Members": [ { "id": 1, "Name": "chips_box_lays_001", "Scale": 1.0 } ] }
    ]
  }
}"#;

    #[test]
    fn test_parse_sample() {
        let document = parse_whitelist(SAMPLE).unwrap();

        assert_eq!(document.shelves.len(), 2);
        assert_eq!(document.shelves[1].name, "BP_ShelfMain_002");
        assert_eq!(document.shelves[1].id, 1);

        assert_eq!(document.products.len(), 2);
        assert_eq!(document.products[0].repeat, MemberSelector::Explicit(vec![3, 6]));
        assert_eq!(document.products[0].members[0].id, 6);
        assert_eq!(document.products[0].description.as_deref(), Some("Yellow can"));
        assert_eq!(document.products[1].repeat, MemberSelector::Count(1));
        assert_eq!(document.products[1].description, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", SAMPLE).unwrap();

        let document = load_whitelist(temp_file.path()).unwrap();
        let summary = document.summary();
        assert_eq!(summary.shelf_count, 2);
        assert_eq!(summary.group_count, 2);
        assert_eq!(summary.member_count, 3);
        assert_eq!(summary.group_names, vec!["chips_can_lays", "chips_box_lays"]);
    }

    #[test]
    fn test_empty_and_malformed() {
        assert!(matches!(parse_whitelist("   \n"), Err(ReaderError::Empty)));
        assert!(matches!(parse_whitelist("{\"Whitelist\": "), Err(ReaderError::Parse(_))));
    }

    #[test]
    fn test_missing_sections() {
        assert!(matches!(
            parse_whitelist(r#"{"Shelves": []}"#),
            Err(ReaderError::MissingSection("Whitelist"))
        ));
        assert!(matches!(
            parse_whitelist(r#"{"Whitelist": {"Products": []}}"#),
            Err(ReaderError::MissingSection("Shelves"))
        ));
        assert!(matches!(
            parse_whitelist(r#"{"Whitelist": {"Shelves": []}}"#),
            Err(ReaderError::MissingSection("Products"))
        ));
        assert!(matches!(
            parse_whitelist(r#"{"Whitelist": {"Shelves": {}, "Products": []}}"#),
            Err(ReaderError::MissingSection("Shelves"))
        ));
    }

    #[test]
    fn test_bad_record_shape() {
        let bad = r#"{"Whitelist": {"Shelves": [{"Name": "BP_ShelfMain_001"}], "Products": []}}"#;
        let err = parse_whitelist(bad).unwrap_err();
        assert!(matches!(err, ReaderError::Shape { section: "Shelves", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_whitelist(Path::new("/nonexistent/Whitelist.json")).unwrap_err();
        assert!(matches!(err, ReaderError::Io(_)));
    }
}
