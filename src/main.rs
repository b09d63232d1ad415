use std::env;
use std::fs;
use std::process::ExitCode;

use cost_valuation::{ComputeCostsRequest, Engine};

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: cost-valuation <config.json>");
        return ExitCode::FAILURE;
    };

    let data = match fs::read_to_string(&path) {
        Ok(data) => data,
        Err(err) => {
            log::error!("failed to read {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let request: ComputeCostsRequest = match serde_json::from_str(&data) {
        Ok(request) => request,
        Err(err) => {
            log::error!("failed to parse {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let engine = match Engine::new(&request.config) {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("failed to build engine: {err}");
            return ExitCode::FAILURE;
        }
    };

    let costs = engine.compute_all_costs(request.iterations);
    log::info!("computed costs for {} items", costs.len());

    for cost in &costs {
        if cost.cost.is_infinite() {
            println!("{}: unreachable", cost.item);
        } else {
            println!("{}: {:.4}", cost.item, cost.cost);
        }
    }

    ExitCode::SUCCESS
}
