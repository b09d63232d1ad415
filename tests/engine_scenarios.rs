//! End-to-end scenarios exercising `Engine` as a whole: recipe expansion,
//! transformation construction, and the relaxation loop together.

use cost_valuation::item::{Bonus, BonusMap, Item, ItemCounts};
use cost_valuation::model::{Configuration, Machine, MachineSettings, Recipe};
use cost_valuation::Engine;
use indexmap::IndexMap;

fn machine(speed: f64) -> Machine {
    Machine { name: "m".into(), speed, module_slots: 2, base_effect: Bonus::ZERO }
}

fn settings(name: &str, module: Bonus) -> MachineSettings {
    MachineSettings { name: name.into(), module, num_beacons: 0, beacon: None }
}

fn recipe(
    name: &str,
    category: &str,
    inputs: &[(&str, f64)],
    outputs: &[(&str, f64)],
    is_mining: bool,
) -> Recipe {
    let mut in_map = ItemCounts::new();
    for (n, c) in inputs {
        in_map.insert(Item::item(*n, 1), *c);
    }
    let mut out_map = ItemCounts::new();
    for (n, c) in outputs {
        out_map.insert(Item::item(*n, 1), *c);
    }
    Recipe {
        name: name.into(),
        category: category.into(),
        time: 1.0,
        inputs: in_map,
        outputs: out_map,
        outputs_no_productivity: ItemCounts::new(),
        quality: 1,
        allow_productivity: true,
        allow_quality: true,
        max_productivity: 3.0,
        is_mining,
    }
}

fn base_config(recipes: Vec<Recipe>) -> Configuration {
    let mut machines = IndexMap::new();
    machines.insert("crafting".to_string(), machine(1.0));
    machines.insert("mining".to_string(), machine(1.0));
    Configuration {
        enable_quality: false,
        enable_recycling: false,
        machine_time_cost: 1.0,
        resource_base_cost: 1.0,
        machines,
        machine_settings_available: vec![settings("none", Bonus::ZERO)],
        mining_productivity: Bonus::ZERO,
        recipe_bonuses: BonusMap::new(),
        recipes,
    }
}

#[test]
fn s3_productivity_lowers_cost_per_output() {
    let mut config = base_config(vec![recipe("a-to-b", "crafting", &[("a", 1.0)], &[("b", 1.0)], false)]);
    config.machine_settings_available =
        vec![settings("none", Bonus::ZERO), settings("prod", Bonus::new("prod", 0.0, 1.0, 0.0))];
    let engine = Engine::new(&config).unwrap();
    let costs = engine.compute_all_costs(20);
    let b = costs.iter().find(|c| c.item == Item::item("b", 1)).unwrap();
    // best transformation uses the productivity module: cost of b < 2 (the no-module rate)
    assert!(b.cost < 2.0 - 1e-6);
}

#[test]
fn s4_catalyst_netting_reduces_effective_input_cost() {
    // a + catalyst -> b + catalyst, catalyst nets out entirely.
    let mut inputs = ItemCounts::new();
    inputs.insert(Item::item("a", 1), 1.0);
    inputs.insert(Item::item("catalyst", 1), 1.0);
    let mut outputs = ItemCounts::new();
    outputs.insert(Item::item("b", 1), 1.0);
    outputs.insert(Item::item("catalyst", 1), 1.0);
    let r = Recipe {
        name: "catalyzed".into(),
        category: "crafting".into(),
        time: 1.0,
        inputs,
        outputs,
        outputs_no_productivity: ItemCounts::new(),
        quality: 1,
        allow_productivity: true,
        allow_quality: true,
        max_productivity: 3.0,
        is_mining: false,
    };
    // give catalyst a way to exist so it isn't unreachable and doesn't taint the chain
    let seed = recipe("make-catalyst", "crafting", &[], &[("catalyst", 1.0)], false);
    let config = base_config(vec![r, seed]);
    let engine = Engine::new(&config).unwrap();
    let costs = engine.compute_all_costs(20);
    let a = costs.iter().find(|c| c.item == Item::item("a", 1)).unwrap();
    let b = costs.iter().find(|c| c.item == Item::item("b", 1)).unwrap();
    // b only costs a's input plus machine time, the catalyst nets out of the rate vectors
    assert!((b.cost - (a.cost + 1.0)).abs() < 1e-6);
}

#[test]
fn s6_quality_modules_split_output_across_tiers() {
    let mut config = base_config(vec![recipe("a-to-b", "crafting", &[("a", 1.0)], &[("b", 1.0)], false)]);
    config.enable_quality = true;
    config.machine_settings_available = vec![settings("quality", Bonus::new("quality", 0.0, 0.0, 0.1))];
    let engine = Engine::new(&config).unwrap();
    let costs = engine.compute_all_costs(30);

    let b1 = costs.iter().find(|c| c.item == Item::item("b", 1)).unwrap();
    let b5 = costs.iter().find(|c| c.item == Item::item("b", 5)).unwrap();
    assert!(b1.cost.is_finite());
    assert!(b5.cost.is_finite());
    // a higher quality tier never costs less per unit than the base tier's
    // source transformation, since it is the same recipe spread thinner
    assert!(b5.cost >= b1.cost - 1e-6);
}

#[test]
fn unreachable_chain_reports_infinity_without_poisoning_siblings() {
    let config = base_config(vec![
        recipe("a-to-b", "crafting", &[("a", 1.0)], &[("b", 1.0)], false),
        recipe("missing-to-c", "crafting", &[("ghost", 1.0)], &[("c", 1.0)], false),
    ]);
    let engine = Engine::new(&config).unwrap();
    let costs = engine.compute_all_costs(25);
    let b = costs.iter().find(|c| c.item == Item::item("b", 1)).unwrap();
    let c = costs.iter().find(|c| c.item == Item::item("c", 1)).unwrap();
    assert!(b.cost.is_finite());
    assert!(c.cost.is_infinite());
}

#[test]
fn recycling_discount_never_makes_cost_negative() {
    // b-recycling turns a higher quality b back into lower-quality inputs.
    let mut config = base_config(vec![recipe("a-to-b", "crafting", &[("a", 1.0)], &[("b", 1.0)], false)]);
    config.enable_quality = true;
    config.enable_recycling = true;
    config.machine_settings_available = vec![settings("quality", Bonus::new("quality", 0.0, 0.0, 0.2))];

    let mut recycle_in = ItemCounts::new();
    recycle_in.insert(Item::item("b", 2), 1.0);
    let mut recycle_out = ItemCounts::new();
    recycle_out.insert(Item::item("b", 1), 1.0);
    config.recipes.push(Recipe {
        name: "b-recycling".into(),
        category: "crafting".into(),
        time: 1.0,
        inputs: recycle_in,
        outputs: recycle_out,
        outputs_no_productivity: ItemCounts::new(),
        quality: 1,
        allow_productivity: false,
        allow_quality: false,
        max_productivity: 0.0,
        is_mining: false,
    });

    let engine = Engine::new(&config).unwrap();
    for cost in engine.compute_all_costs(25) {
        assert!(!cost.cost.is_nan());
        assert!(cost.cost >= 0.0);
    }
}

#[test]
fn no_item_appears_on_both_sides_of_any_transformation() {
    let mut inputs = ItemCounts::new();
    inputs.insert(Item::item("x", 1), 4.0);
    let mut outputs = ItemCounts::new();
    outputs.insert(Item::item("x", 1), 4.0);
    outputs.insert(Item::item("y", 1), 1.0);
    let r = Recipe {
        name: "exact-catalyst".into(),
        category: "crafting".into(),
        time: 1.0,
        inputs,
        outputs,
        outputs_no_productivity: ItemCounts::new(),
        quality: 1,
        allow_productivity: false,
        allow_quality: false,
        max_productivity: 0.0,
        is_mining: false,
    };
    let config = base_config(vec![r]);
    let engine = Engine::new(&config).unwrap();
    // building succeeded and y is reachable with x fully netted out (cost 1 = machine time only)
    let costs = engine.compute_all_costs(10);
    let y = costs.iter().find(|c| c.item == Item::item("y", 1)).unwrap();
    assert!((y.cost - 1.0).abs() < 1e-6);
}
