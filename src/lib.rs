//! Production cost valuation: turns a [`model::Configuration`] into a
//! per-item cost table by relaxing a fixed point over derived
//! transformations.

pub mod api;
pub mod engine;
pub mod error;
pub mod item;
pub mod model;
pub mod recipe_expansion;
pub mod transformation;

pub use api::{ComputeCostsRequest, ComputeCostsResponse};
pub use engine::{Engine, ItemCost};
pub use error::{ConfigError, EngineError, InvariantError};
pub use item::{Beacon, Bonus, BonusMap, Item, ItemCounts};
pub use model::{Configuration, Machine, MachineSettings, Recipe};
