//! Whitelist expansion.
//!
//! Turns shelf and product group templates into fully enumerated instances.
//! Everything here is a pure transform over owned data: templates are only
//! read, and every instance gets its own copies of the template's vectors.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::{Config, ProductGroupTemplate, ShelfTemplate};
use crate::whitelist::types::{ProductGroupInstance, ProductMember, ShelfInstance, WhitelistDocument};

/// Append a zero-padded, at least 3-digit index to a base name.
///
/// Indices past 999 widen instead of being truncated.
///
/// # Examples
/// ```
/// use shelfgen::builder::indexed_name;
///
/// assert_eq!(indexed_name("BP_ShelfMain", 1), "BP_ShelfMain_001");
/// assert_eq!(indexed_name("chips_olddutch", 1000), "chips_olddutch_1000");
/// ```
pub fn indexed_name(base: &str, index: u32) -> String {
    format!("{}_{:03}", base, index)
}

/// Expand shelf templates into numbered instances.
///
/// Instances are flattened in template order, then in sequence order within a
/// template. A template with `repeat_count == 0` contributes nothing.
pub fn build_shelves(templates: &[ShelfTemplate]) -> Vec<ShelfInstance> {
    let mut shelves = Vec::with_capacity(templates.iter().map(|t| t.repeat_count as usize).sum());

    for template in templates {
        debug!(
            "Expanding shelf template '{}' into {} instance(s)",
            template.name, template.repeat_count
        );
        for id in 0..template.repeat_count {
            shelves.push(ShelfInstance {
                name: indexed_name(&template.name, id + 1),
                repeat: template.repeat_count,
                scale: template.scale,
                shelf_base: template.shelf_base_positions.clone(),
                shelf_offset: template.shelf_offsets.clone(),
                id,
            });
        }
    }

    shelves
}

/// Expand product group templates, shuffling members with the thread RNG when
/// `shuffle_members` is set.
pub fn build_product_groups(
    templates: &[ProductGroupTemplate],
    shuffle_members: bool,
) -> Vec<ProductGroupInstance> {
    build_product_groups_with_rng(templates, shuffle_members, &mut rand::thread_rng())
}

/// Expand product group templates using a caller-supplied RNG for shuffling.
///
/// Each group's selector is normalized into a fresh id list before it is
/// permuted, so the templates keep their original order across repeated
/// builds. Member ids are the selector values themselves.
pub fn build_product_groups_with_rng<R: Rng + ?Sized>(
    templates: &[ProductGroupTemplate],
    shuffle_members: bool,
    rng: &mut R,
) -> Vec<ProductGroupInstance> {
    templates
        .iter()
        .map(|template| {
            let mut ids = template.members.member_ids();
            if shuffle_members {
                ids.shuffle(rng);
            }

            debug!(
                "Expanding product group '{}'{} on '{}' into {} member(s)",
                template.group_name,
                template
                    .description
                    .as_deref()
                    .map(|d| format!(" ({})", d))
                    .unwrap_or_default(),
                template.shelf_name,
                ids.len()
            );

            let members = ids
                .into_iter()
                .map(|id| ProductMember {
                    id,
                    name: indexed_name(&template.group_name, id),
                    scale: template.scale,
                })
                .collect();

            ProductGroupInstance {
                group_name: template.group_name.clone(),
                shelf_name: template.shelf_name.clone(),
                repeat: template.members.clone(),
                scale: template.scale,
                discard: template.discard,
                description: template.description.clone(),
                members,
            }
        })
        .collect()
}

/// Validate a configuration and expand it into a whitelist document.
///
/// Shuffling follows `general.shuffle_members`; when `general.seed` is set the
/// shuffle is reproducible.
pub fn build_whitelist(config: &Config) -> color_eyre::Result<WhitelistDocument> {
    config.validate()?;

    let shelves = build_shelves(&config.shelves);

    let shuffle = config.general.shuffle_members();
    let products = match config.general.seed {
        Some(seed) if shuffle => {
            info!("Shuffling product group members with seed {}", seed);
            let mut rng = StdRng::seed_from_u64(seed);
            build_product_groups_with_rng(&config.products, true, &mut rng)
        }
        _ => {
            if shuffle {
                info!("Shuffling product group members with a random seed");
            }
            build_product_groups(&config.products, shuffle)
        }
    };

    info!(
        "Built {} shelves and {} product groups",
        shelves.len(),
        products.len()
    );

    Ok(WhitelistDocument { shelves, products })
}
