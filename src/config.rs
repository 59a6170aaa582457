use serde::{Deserialize, Serialize};

use crate::utils::selector::deserialize_selector;

/// Default destination for the generated whitelist
pub const DEFAULT_OUTPUT: &str = "Whitelist.json";

/// Upper bound on the members a single product group may expand to
pub const MAX_GROUP_MEMBERS: usize = 100_000;

/// Upper bound on the instances a single shelf template may repeat to
pub const MAX_SHELF_INSTANCES: u32 = 10_000;

/// Top-level configuration structure that mirrors the YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// General generation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Shelf fixture templates, in declaration order
    #[serde(default)]
    pub shelves: Vec<ShelfTemplate>,
    /// Product group templates, in declaration order
    #[serde(default)]
    pub products: Vec<ProductGroupTemplate>,
}

/// General configuration settings for whitelist generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// (Optional) Destination path of the whitelist (default: "Whitelist.json")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// (Optional) Shuffle the members of every product group (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shuffle_members: Option<bool>,
    /// (Optional) Seed for reproducible shuffles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// (Optional) Pretty-print the JSON output (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl GeneralConfig {
    pub fn output(&self) -> &str {
        self.output.as_deref().unwrap_or(DEFAULT_OUTPUT)
    }

    pub fn shuffle_members(&self) -> bool {
        self.shuffle_members.unwrap_or(false)
    }

    pub fn pretty(&self) -> bool {
        self.pretty.unwrap_or(true)
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            output: None,
            shuffle_members: Some(false),
            seed: None,
            pretty: Some(true),
        }
    }
}

/// A repeated physical shelf fixture and its shelf-level geometry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawShelfTemplate")]
pub struct ShelfTemplate {
    /// Base name, e.g. the fixture blueprint tag
    pub name: String,
    /// Number of physical instances of this fixture
    pub repeat_count: u32,
    pub scale: f64,
    /// Normalized shelf-level heights in [0, 1], lowest level first
    pub shelf_base_positions: Vec<f64>,
    /// Per-level offsets, paired positionally with `shelf_base_positions`
    pub shelf_offsets: Vec<f64>,
}

/// Shelf template as written in YAML, before the repeat count is checked
#[derive(Deserialize)]
struct RawShelfTemplate {
    name: String,
    #[serde(alias = "repeat")]
    repeat_count: i64,
    #[serde(default = "default_scale")]
    scale: f64,
    #[serde(alias = "shelfbase")]
    shelf_base_positions: Vec<f64>,
    #[serde(alias = "shelfoffset")]
    shelf_offsets: Vec<f64>,
}

impl TryFrom<RawShelfTemplate> for ShelfTemplate {
    type Error = String;

    fn try_from(raw: RawShelfTemplate) -> Result<Self, Self::Error> {
        let repeat_count = u32::try_from(raw.repeat_count).map_err(|_| {
            format!(
                "Invalid shelf template '{}': repeat_count {} must be between 0 and {}",
                raw.name,
                raw.repeat_count,
                u32::MAX
            )
        })?;

        Ok(Self {
            name: raw.name,
            repeat_count,
            scale: raw.scale,
            shelf_base_positions: raw.shelf_base_positions,
            shelf_offsets: raw.shelf_offsets,
        })
    }
}

/// A named batch of product placements sharing a target shelf and scale.
///
/// Several templates may share the same `group_name` and `shelf_name` when a
/// physical product line is split into sub-batches by visual variant; the
/// `description` tells them apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductGroupTemplate {
    pub group_name: String,
    /// Name of the shelf instance this group is placed on
    pub shelf_name: String,
    /// Which member indices belong to the group
    #[serde(alias = "repeat", deserialize_with = "deserialize_selector")]
    pub members: MemberSelector,
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Passed through to the whitelist untouched
    #[serde(default)]
    pub discard: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Member indices of a product group: either `1..=n` or an explicit list.
///
/// Serializes as the bare count or the bare list, which is also the shape of
/// the `"Repeat"` field in the generated whitelist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MemberSelector {
    Count(u32),
    Explicit(Vec<u32>),
}

impl MemberSelector {
    /// Normalize into an owned, ordered id sequence.
    ///
    /// Explicit lists keep their order and duplicates.
    pub fn member_ids(&self) -> Vec<u32> {
        match self {
            MemberSelector::Count(count) => (1..=*count).collect(),
            MemberSelector::Explicit(ids) => ids.clone(),
        }
    }

    /// Number of members the selector expands to
    pub fn len(&self) -> usize {
        match self {
            MemberSelector::Count(count) => *count as usize,
            MemberSelector::Explicit(ids) => ids.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn default_scale() -> f64 {
    1.0
}

impl Config {
    /// Validate the configuration
    ///
    /// Every malformed template is reported by position and name; nothing is
    /// coerced or truncated.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(output) = &self.general.output {
            if output.trim().is_empty() {
                return Err(ValidationError::InvalidGeneral(
                    "output cannot be empty".to_string(),
                ));
            }
        }

        for (index, shelf) in self.shelves.iter().enumerate() {
            shelf.validate().map_err(|reason| ValidationError::InvalidShelf {
                index,
                name: shelf.name.clone(),
                reason,
            })?;
        }

        for (index, group) in self.products.iter().enumerate() {
            group.validate().map_err(|reason| ValidationError::InvalidProductGroup {
                index,
                name: group.group_name.clone(),
                reason,
            })?;
        }

        Ok(())
    }
}

impl ShelfTemplate {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name cannot be empty".to_string());
        }
        validate_scale(self.scale)?;

        if self.repeat_count > MAX_SHELF_INSTANCES {
            return Err(format!(
                "repeat_count {} exceeds the limit of {}",
                self.repeat_count, MAX_SHELF_INSTANCES
            ));
        }

        if self.shelf_base_positions.len() != self.shelf_offsets.len() {
            return Err(format!(
                "{} shelf base positions but {} shelf offsets",
                self.shelf_base_positions.len(),
                self.shelf_offsets.len()
            ));
        }

        for (level, base) in self.shelf_base_positions.iter().enumerate() {
            if !(0.0..=1.0).contains(base) {
                return Err(format!(
                    "shelf base position {} at level {} is outside [0, 1]",
                    base, level
                ));
            }
        }

        if let Some(level) = self.shelf_offsets.iter().position(|o| !o.is_finite()) {
            return Err(format!("shelf offset at level {} is not finite", level));
        }

        Ok(())
    }
}

impl ProductGroupTemplate {
    fn validate(&self) -> Result<(), String> {
        if self.group_name.trim().is_empty() {
            return Err("group_name cannot be empty".to_string());
        }
        if self.shelf_name.trim().is_empty() {
            return Err("shelf_name cannot be empty".to_string());
        }
        validate_scale(self.scale)?;

        // Count(0) and an empty list both describe a group with no members
        if self.members.is_empty() {
            return Err("member selector must select at least one member".to_string());
        }
        if self.members.len() > MAX_GROUP_MEMBERS {
            return Err(format!(
                "member selector expands to {} members (limit is {})",
                self.members.len(),
                MAX_GROUP_MEMBERS
            ));
        }
        if let MemberSelector::Explicit(ids) = &self.members {
            if let Some(position) = ids.iter().position(|&id| id == 0) {
                return Err(format!(
                    "member index at position {} is 0 (indices start at 1)",
                    position
                ));
            }
        }

        Ok(())
    }
}

fn validate_scale(scale: f64) -> Result<(), String> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(format!("scale must be a positive finite number, got {}", scale));
    }
    Ok(())
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid shelf template #{index} '{name}': {reason}")]
    InvalidShelf {
        index: usize,
        name: String,
        reason: String,
    },
    #[error("Invalid product group template #{index} '{name}': {reason}")]
    InvalidProductGroup {
        index: usize,
        name: String,
        reason: String,
    },
}
