//! The fixed-point valuation engine: builds the transformation set from a
//! `Configuration` and relaxes per-item costs to a self-consistent
//! minimum over all producing transformations.

use indexmap::IndexMap;

use crate::error::EngineError;
use crate::item::Item;
use crate::model::Configuration;
use crate::recipe_expansion::build_recipe_map;
use crate::transformation::Transformation;

const MIN_ITERATIONS: usize = 1;
const MAX_ITERATIONS: usize = 1000;
const DEFAULT_ITERATIONS: usize = 100;

/// One item's settled cost plus the ranked list of transformations that
/// could produce it, sorted ascending by the candidate value they offered
/// on the final relaxation round.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCost {
    pub item: Item,
    pub cost: f64,
    pub transformation_costs: Vec<(String, f64)>,
}

/// Owns the derived transformation set for one `Configuration` and runs
/// `compute_all_costs` against it. Single-threaded, pure, and
/// side-effect-free beyond logging.
pub struct Engine {
    enable_recycling: bool,
    machine_time_cost: f64,
    resource_base_cost: f64,
    transformations: Vec<Transformation>,
}

impl Engine {
    pub fn new(config: &Configuration) -> Result<Engine, EngineError> {
        let recipe_map = build_recipe_map(&config.recipes, config.enable_quality, config.enable_recycling)?;

        let mut transformations = Vec::new();
        for recipe in recipe_map.values() {
            let Some(machine) = config.machines.get(&recipe.category) else {
                log::debug!(
                    "skipping recipe {:?}: no machine registered for category {:?}",
                    recipe.name,
                    recipe.category
                );
                continue;
            };
            for settings in &config.machine_settings_available {
                if settings.uses_productivity_modules() && !recipe.allow_productivity {
                    continue;
                }
                if settings.uses_quality_modules() && (!config.enable_quality || !recipe.allow_quality) {
                    continue;
                }
                let name = format!("{} [{}]", recipe.name, settings.name);
                let transformation = Transformation::build(
                    name,
                    recipe.clone(),
                    machine.clone(),
                    settings.clone(),
                    &config.recipe_bonuses,
                    &config.mining_productivity,
                )?;
                transformations.push(transformation);
            }
        }

        log::info!("engine built with {} transformations", transformations.len());

        Ok(Engine {
            enable_recycling: config.enable_recycling,
            machine_time_cost: config.machine_time_cost,
            resource_base_cost: config.resource_base_cost,
            transformations,
        })
    }

    fn initial_costs(&self) -> IndexMap<Item, f64> {
        let mut costs = IndexMap::new();
        for t in &self.transformations {
            for item in t.inputs_per_sec.keys() {
                costs.entry(item.clone()).or_insert(self.resource_base_cost);
            }
            for item in t.outputs_per_sec.keys() {
                costs.entry(item.clone()).or_insert(self.resource_base_cost);
            }
        }
        costs.insert(Item::base_resource(), self.resource_base_cost);
        costs
    }

    /// One relaxation round: `new_costs[item] = min over producing
    /// transformations of (time_cost + inputs - discount) / effective_count`.
    /// When `record` is set, also returns the per-item ranked transformation
    /// list used for the final report.
    fn iterate(
        &self,
        item_costs: &IndexMap<Item, f64>,
        record: bool,
    ) -> (IndexMap<Item, f64>, Option<IndexMap<Item, Vec<(String, f64)>>>) {
        let mut new_costs: IndexMap<Item, f64> = IndexMap::new();
        let mut report: Option<IndexMap<Item, Vec<(String, f64)>>> =
            if record { Some(IndexMap::new()) } else { None };

        for t in &self.transformations {
            let total_input_cost: f64 =
                t.inputs_per_sec.iter().map(|(item, count)| item_costs[item] * count).sum();
            let total_output_cost: f64 =
                t.outputs_per_sec.iter().map(|(item, count)| item_costs[item] * count).sum();

            for (item, _raw_count) in &t.outputs_per_sec {
                let mut discount = 0.0;
                if self.enable_recycling {
                    let mut d = 0.0;
                    for (other, count) in &t.outputs_per_sec {
                        if other.name == item.name && other.quality > item.quality {
                            d += item_costs[other] * count;
                        }
                    }
                    d *= 0.25;
                    d *= if total_output_cost > 0.0 { total_input_cost / total_output_cost } else { 0.0 };
                    discount = d;
                }

                let count: f64 = t
                    .outputs_per_sec
                    .iter()
                    .filter(|(other, _)| other.name == item.name && other.quality >= item.quality)
                    .map(|(_, c)| c)
                    .sum();

                let time_cost =
                    self.machine_time_cost * if t.recipe.is_mining { 10.0 } else { 1.0 };
                let candidate = (time_cost + total_input_cost - discount) / count;

                let slot = new_costs.entry(item.clone()).or_insert(f64::INFINITY);
                if candidate < *slot {
                    *slot = candidate;
                }

                if let Some(report) = report.as_mut() {
                    report.entry(item.clone()).or_default().push((t.name.clone(), candidate));
                }
            }
        }

        for item in item_costs.keys() {
            new_costs.entry(item.clone()).or_insert(f64::INFINITY);
        }
        new_costs.insert(Item::base_resource(), self.resource_base_cost);

        if let Some(report) = report.as_mut() {
            for list in report.values_mut() {
                list.sort_by(|a, b| a.1.total_cmp(&b.1));
            }
        }

        (new_costs, report)
    }

    /// Runs `iterations` (clamped to `[1, 1000]`, default 100) relaxation
    /// rounds plus one final instrumented round, and returns one
    /// `ItemCost` per item present in the terminal cost map.
    pub fn compute_all_costs(&self, iterations: usize) -> Vec<ItemCost> {
        let iterations = if iterations == 0 {
            log::warn!("iterations clamped from 0 to {MIN_ITERATIONS}");
            MIN_ITERATIONS
        } else if iterations > MAX_ITERATIONS {
            log::warn!("iterations clamped from {iterations} to {MAX_ITERATIONS}");
            MAX_ITERATIONS
        } else {
            iterations
        };

        let mut item_costs = self.initial_costs();
        for _ in 0..iterations {
            let (new_costs, _) = self.iterate(&item_costs, false);
            item_costs = new_costs;
        }

        let (final_costs, report) = self.iterate(&item_costs, true);
        let report = report.unwrap_or_default();

        final_costs
            .into_iter()
            .map(|(item, cost)| {
                let transformation_costs = report.get(&item).cloned().unwrap_or_default();
                ItemCost { item, cost, transformation_costs }
            })
            .collect()
    }
}

/// `iterations` defaulted the way `Controller.compute_all_costs(iterations=100)` does.
pub fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}
