//! Whitelist document type definitions.
//!
//! These structures are the on-disk contract with the placement system that
//! consumes `Whitelist.json`. Key names, including the lowercase `id` next to
//! capitalized siblings, must not change.

use serde::{Deserialize, Serialize};

use crate::config::MemberSelector;

// ============================================================================
// Shelves
// ============================================================================

/// One concrete, numbered occurrence of a shelf template.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShelfInstance {
    /// Template name plus a zero-padded 1-based suffix, e.g. `BP_ShelfMain_001`
    #[serde(rename = "Name")]
    pub name: String,
    /// Repeat count of the template this instance came from
    #[serde(rename = "Repeat")]
    pub repeat: u32,
    #[serde(rename = "Scale")]
    pub scale: f64,
    /// Normalized shelf-level heights
    #[serde(rename = "Shelfbase")]
    pub shelf_base: Vec<f64>,
    /// Per-level offsets paired with `shelf_base`
    #[serde(rename = "Shelfoffset")]
    pub shelf_offset: Vec<f64>,
    /// 0-based position within the template's instances
    pub id: u32,
}

// ============================================================================
// Products
// ============================================================================

/// A single product placement within a group.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductMember {
    /// The selector value this member was built from
    pub id: u32,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Scale")]
    pub scale: f64,
}

/// A product group template together with its enumerated members.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProductGroupInstance {
    #[serde(rename = "GroupName")]
    pub group_name: String,
    #[serde(rename = "ShelfName")]
    pub shelf_name: String,
    /// The normalized selector: a bare count or the expanded id list
    #[serde(rename = "Repeat")]
    pub repeat: MemberSelector,
    #[serde(rename = "Scale")]
    pub scale: f64,
    #[serde(rename = "Discard")]
    pub discard: bool,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "Members")]
    pub members: Vec<ProductMember>,
}

// ============================================================================
// Document
// ============================================================================

/// The fully materialized whitelist.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct WhitelistDocument {
    #[serde(rename = "Shelves")]
    pub shelves: Vec<ShelfInstance>,
    #[serde(rename = "Products")]
    pub products: Vec<ProductGroupInstance>,
}

/// Root JSON object wrapping the document under the `Whitelist` key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WhitelistFile {
    #[serde(rename = "Whitelist")]
    pub whitelist: WhitelistDocument,
}

/// Counts describing a whitelist, used for logging and `--check` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistSummary {
    pub shelf_count: usize,
    pub group_count: usize,
    pub member_count: usize,
    /// Distinct group names, in first-seen order
    pub group_names: Vec<String>,
}

impl WhitelistDocument {
    /// Summarize shelf, group and member counts
    pub fn summary(&self) -> WhitelistSummary {
        let mut group_names: Vec<String> = Vec::new();
        for group in &self.products {
            if !group_names.contains(&group.group_name) {
                group_names.push(group.group_name.clone());
            }
        }

        WhitelistSummary {
            shelf_count: self.shelves.len(),
            group_count: self.products.len(),
            member_count: self.products.iter().map(|g| g.members.len()).sum(),
            group_names,
        }
    }
}

impl std::fmt::Display for WhitelistSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} shelves, {} product groups ({} distinct names), {} members",
            self.shelf_count,
            self.group_count,
            self.group_names.len(),
            self.member_count
        )
    }
}
