//! Machines, recipes, and the read-only `Configuration` facade consumed by
//! recipe expansion and the transformation builder.

use serde::{Deserialize, Serialize};

use crate::item::{Beacon, Bonus, BonusMap, ItemCounts, MIN_QUALITY};

/// A concrete producer assigned to a recipe by category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub name: String,
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default)]
    pub module_slots: u32,
    #[serde(default)]
    pub base_effect: Bonus,
}

fn default_speed() -> f64 {
    1.0
}

/// A module/beacon preset applied to a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineSettings {
    pub name: String,
    pub module: Bonus,
    #[serde(default)]
    pub num_beacons: u32,
    #[serde(default)]
    pub beacon: Option<Beacon>,
}

impl MachineSettings {
    /// `effect_total(m) = m.base_effect + module * m.module_slots +
    /// (beacon.transmission * sqrt(num_beacons)) * beacon.effect`
    pub fn effect_total(&self, machine: &Machine) -> Bonus {
        let mut effect =
            machine.base_effect.clone() + self.module.clone() * machine.module_slots as f64;
        if let Some(beacon) = &self.beacon {
            if self.num_beacons > 0 {
                effect += (beacon.transmission * (self.num_beacons as f64).sqrt()) * beacon.effect.clone();
            }
        }
        effect
    }

    pub fn uses_productivity_modules(&self) -> bool {
        self.module.productivity > 0.0
            || self.beacon.as_ref().is_some_and(|b| b.effect.productivity > 0.0)
    }

    pub fn uses_quality_modules(&self) -> bool {
        self.module.quality > 0.0 || self.beacon.as_ref().is_some_and(|b| b.effect.quality > 0.0)
    }
}

/// A declarative production rule: inputs, outputs, timing, permissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub category: String,
    pub time: f64,
    pub inputs: ItemCounts,
    pub outputs: ItemCounts,
    #[serde(default)]
    pub outputs_no_productivity: ItemCounts,
    #[serde(default = "default_quality")]
    pub quality: u8,
    #[serde(default = "default_true")]
    pub allow_productivity: bool,
    #[serde(default = "default_true")]
    pub allow_quality: bool,
    #[serde(default = "default_max_productivity")]
    pub max_productivity: f64,
    #[serde(default)]
    pub is_mining: bool,
}

fn default_quality() -> u8 {
    MIN_QUALITY
}

fn default_true() -> bool {
    true
}

fn default_max_productivity() -> f64 {
    3.0
}

impl Recipe {
    /// Quality-eligible iff it has at least one non-fluid input AND at
    /// least one non-fluid output AND `BASE_RESOURCE` is not an input.
    pub fn is_quality_eligible(&self) -> bool {
        let has_non_fluid_input = self.inputs.keys().any(|i| !i.is_fluid);
        let has_non_fluid_output = self.outputs.keys().any(|i| !i.is_fluid);
        let mines_base_resource =
            self.inputs.keys().any(|i| *i == crate::item::Item::base_resource());
        has_non_fluid_input && has_non_fluid_output && !mines_base_resource
    }
}

/// Read-only aggregate consumed by recipe expansion and the transformation
/// builder. Mutating the source after an [`crate::engine::Engine`] is
/// built has no effect — the engine holds its own derived copies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub enable_quality: bool,
    #[serde(default)]
    pub enable_recycling: bool,
    #[serde(default = "default_one")]
    pub machine_time_cost: f64,
    #[serde(default = "default_one")]
    pub resource_base_cost: f64,
    pub machines: indexmap::IndexMap<String, Machine>,
    pub machine_settings_available: Vec<MachineSettings>,
    #[serde(default)]
    pub mining_productivity: Bonus,
    #[serde(default)]
    pub recipe_bonuses: BonusMap,
    pub recipes: Vec<Recipe>,
}

fn default_one() -> f64 {
    1.0
}
