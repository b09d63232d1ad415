//! Clones quality-eligible recipes across the five quality tiers and
//! applies the recycling-recipe filter.

use indexmap::IndexMap;

use crate::error::ConfigError;
use crate::item::{MAX_QUALITY, MIN_QUALITY};
use crate::model::Recipe;

/// Renames `recipe` to `"<orig>-q<quality>"` and rewrites every
/// input/output/outputs_no_productivity item to the same quality tier
/// (fluids are left at quality 1 by `Item::at_quality`).
fn requalify(recipe: &Recipe, quality: u8) -> Recipe {
    let rewrite = |counts: &crate::item::ItemCounts| -> crate::item::ItemCounts {
        counts.iter().map(|(item, count)| (item.at_quality(quality), *count)).collect()
    };
    Recipe {
        name: format!("{}-q{}", recipe.name, quality),
        category: recipe.category.clone(),
        time: recipe.time,
        inputs: rewrite(&recipe.inputs),
        outputs: rewrite(&recipe.outputs),
        outputs_no_productivity: rewrite(&recipe.outputs_no_productivity),
        quality,
        allow_productivity: recipe.allow_productivity,
        allow_quality: recipe.allow_quality,
        max_productivity: recipe.max_productivity,
        is_mining: recipe.is_mining,
    }
}

/// Replaces each quality-eligible recipe with 5 per-tier copies.
pub fn expand_for_quality(recipes: &[Recipe]) -> Vec<Recipe> {
    let mut result = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        if recipe.is_quality_eligible() {
            for quality in MIN_QUALITY..=MAX_QUALITY {
                result.push(requalify(recipe, quality));
            }
        } else {
            result.push(recipe.clone());
        }
    }
    result
}

/// Drops `-recycling` recipes unless they're also `scrap` recipes (the
/// sole seed of many items, always kept) — only when recycling is
/// disabled.
fn recycling_allowed(name: &str, enable_recycling: bool) -> bool {
    enable_recycling || !name.contains("-recycling") || name.contains("scrap")
}

/// Runs quality expansion (if enabled) and the recycling filter, and
/// indexes the result by name. Fails if two recipes collide on name.
pub fn build_recipe_map(
    recipes: &[Recipe],
    enable_quality: bool,
    enable_recycling: bool,
) -> Result<IndexMap<String, Recipe>, ConfigError> {
    let expanded: Vec<Recipe> =
        if enable_quality { expand_for_quality(recipes) } else { recipes.to_vec() };

    let mut map = IndexMap::with_capacity(expanded.len());
    for recipe in expanded {
        if !recycling_allowed(&recipe.name, enable_recycling) {
            continue;
        }
        let name = recipe.name.clone();
        if map.insert(name.clone(), recipe).is_some() {
            return Err(ConfigError::DuplicateRecipeName(name));
        }
    }
    Ok(map)
}
