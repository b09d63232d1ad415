//! Combines a recipe with a machine and a module/beacon setting into a
//! per-second input/output rate vector: speed, productivity, catalyst
//! netting, and quality redistribution.

use crate::error::{clamp, InvariantError};
use crate::item::{Bonus, BonusMap, Item, ItemCounts, MAX_QUALITY};
use crate::model::{Machine, MachineSettings, Recipe};

/// A `Recipe` × `Machine` × `MachineSettings` triple resolved to
/// per-second rate vectors. Immutable once built.
#[derive(Debug, Clone)]
pub struct Transformation {
    pub name: String,
    pub recipe: Recipe,
    pub machine: Machine,
    pub machine_settings: MachineSettings,
    pub inputs_per_sec: ItemCounts,
    pub outputs_per_sec: ItemCounts,
}

impl Transformation {
    /// Builds the transformation for `recipe` run on `machine` with
    /// `machine_settings`. Does not apply the recipe/machine-settings
    /// eligibility filter — that's the caller's job, since it depends on
    /// engine-wide config flags.
    pub fn build(
        name: String,
        recipe: Recipe,
        machine: Machine,
        machine_settings: MachineSettings,
        recipe_bonuses: &BonusMap,
        mining_productivity: &Bonus,
    ) -> Result<Transformation, InvariantError> {
        let mut extra_effects = machine_settings.effect_total(&machine);
        if let Some(bonus) = recipe_bonuses.get(&recipe.name) {
            extra_effects += bonus.clone();
        }
        if recipe.is_mining {
            extra_effects += mining_productivity.clone();
        }

        let speed_mul = clamp(1.0 + extra_effects.speed, 0.2, f64::INFINITY)?;
        let rate = machine.speed * speed_mul / recipe.time;

        let mut inputs_per_sec = ItemCounts::new();
        for (item, count) in &recipe.inputs {
            inputs_per_sec.insert(item.clone(), count * rate);
        }

        let prod_mul = clamp(1.0 + extra_effects.productivity, 0.0, 1.0 + recipe.max_productivity)?;
        let mut zero_quality: ItemCounts = ItemCounts::new();
        for (item, count) in &recipe.outputs {
            zero_quality.insert(item.clone(), count * rate * prod_mul);
        }
        for (item, count) in &recipe.outputs_no_productivity {
            *zero_quality.entry(item.clone()).or_insert(0.0) += count * rate;
        }

        net_catalysts(&mut inputs_per_sec, &mut zero_quality, &recipe.outputs);

        let quality = clamp(extra_effects.quality, 0.0, f64::INFINITY)?;
        let outputs_per_sec = redistribute_quality(&zero_quality, recipe.quality, quality);

        Ok(Transformation { name, recipe, machine, machine_settings, inputs_per_sec, outputs_per_sec })
    }
}

/// For every item that appears both in `inputs` and `outputs`' recipe
/// keys (the catalyst set), nets the pair down to the signed remainder on
/// whichever side is larger, dropping both entries on an exact match.
fn net_catalysts(inputs: &mut ItemCounts, outputs: &mut ItemCounts, recipe_outputs: &ItemCounts) {
    let catalysts: Vec<Item> = inputs
        .keys()
        .filter(|item| recipe_outputs.contains_key(*item))
        .cloned()
        .collect();
    for item in catalysts {
        let in_rate = match inputs.get(&item) {
            Some(v) => *v,
            None => continue,
        };
        let out_rate = match outputs.get(&item) {
            Some(v) => *v,
            None => continue,
        };
        if in_rate > out_rate {
            inputs.insert(item.clone(), in_rate - out_rate);
            outputs.shift_remove(&item);
        } else if in_rate < out_rate {
            outputs.insert(item.clone(), out_rate - in_rate);
            inputs.shift_remove(&item);
        } else {
            inputs.shift_remove(&item);
            outputs.shift_remove(&item);
        }
    }
}

/// Spreads each pre-quality output rate across quality tiers
/// `recipe_quality..=MAX_QUALITY`, forcing the undistributed remainder
/// onto the top tier so the total always sums to the input rate exactly.
/// Fluids are copied unchanged at quality 1.
fn redistribute_quality(zero_quality: &ItemCounts, recipe_quality: u8, quality: f64) -> ItemCounts {
    let mut outputs = ItemCounts::new();

    for (item, &rate) in zero_quality {
        if item.is_fluid {
            *outputs.entry(item.clone()).or_insert(0.0) += rate;
        } else {
            *outputs.entry(item.at_quality(recipe_quality)).or_insert(0.0) += rate * (1.0 - quality);
        }
    }

    if quality > 0.0 {
        let mut left_over = quality;
        let mut curr_multi = quality * 0.9;
        let mut curr_quality = recipe_quality + 1;
        while curr_quality <= MAX_QUALITY {
            if curr_quality == MAX_QUALITY {
                curr_multi = left_over;
            }
            for (item, &rate) in zero_quality {
                if item.is_fluid {
                    continue;
                }
                *outputs.entry(item.at_quality(curr_quality)).or_insert(0.0) += rate * curr_multi;
            }
            left_over -= curr_multi;
            curr_quality += 1;
            curr_multi *= 0.1;
        }
    }

    outputs
}
