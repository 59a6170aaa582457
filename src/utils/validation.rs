//! Whitelist consistency checks.
//!
//! Nothing here rejects a configuration: shelf references and member ids are
//! trusted input, so these checks only log what the placement system is
//! likely to trip over.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::ProductGroupTemplate;
use crate::whitelist::types::ShelfInstance;

/// Warn about product groups placed on shelves that were never generated
///
/// # Arguments
/// * `shelves` - The generated shelf instances
/// * `products` - The product group templates
///
/// # Returns
/// * The number of product groups whose shelf reference is unknown; each one
///   is logged as a warning
pub fn validate_shelf_references(shelves: &[ShelfInstance], products: &[ProductGroupTemplate]) -> usize {
    let known: HashSet<&str> = shelves.iter().map(|s| s.name.as_str()).collect();

    let mut unknown = 0;
    for group in products {
        if !known.contains(group.shelf_name.as_str()) {
            unknown += 1;
            log::warn!(
                "Product group '{}'{} references shelf '{}', which is not in the whitelist",
                group.group_name,
                describe(group),
                group.shelf_name
            );
        }
    }

    if unknown == 0 {
        log::debug!("All {} product groups reference generated shelves", products.len());
    }

    unknown
}

/// Warn about member ids that will produce duplicate member names
///
/// Checks for:
/// - The same id listed twice inside one group
/// - The same id claimed by two groups sharing a group name (overlapping
///   variant splits)
///
/// Returns the number of warnings logged.
pub fn validate_member_uniqueness(products: &[ProductGroupTemplate]) -> usize {
    // group name -> id -> index of the first template claiming it
    let mut claimed: BTreeMap<&str, HashMap<u32, usize>> = BTreeMap::new();
    let mut warnings = 0;

    for (index, group) in products.iter().enumerate() {
        let mut seen = HashSet::new();
        let owners = claimed.entry(group.group_name.as_str()).or_default();

        for id in group.members.member_ids() {
            if !seen.insert(id) {
                warnings += 1;
                log::warn!(
                    "Product group '{}'{} lists member {} more than once",
                    group.group_name,
                    describe(group),
                    id
                );
                continue;
            }

            if let Some(&first) = owners.get(&id) {
                warnings += 1;
                log::warn!(
                    "Member {} of '{}' is claimed by product group templates #{} and #{}",
                    id,
                    group.group_name,
                    first,
                    index
                );
            } else {
                owners.insert(id, index);
            }
        }
    }

    warnings
}

/// Collect every member name that would be emitted more than once
pub fn duplicate_member_names(products: &[ProductGroupTemplate]) -> Vec<String> {
    let mut counts: BTreeMap<(&str, u32), usize> = BTreeMap::new();
    for group in products {
        for id in group.members.member_ids() {
            *counts.entry((group.group_name.as_str(), id)).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|((name, id), _)| crate::builder::indexed_name(name, id))
        .collect()
}

fn describe(group: &ProductGroupTemplate) -> String {
    group
        .description
        .as_deref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default()
}
