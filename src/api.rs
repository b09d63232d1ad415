//! Wire types for handing a `Configuration` in and getting costs back out.
//! No transport is implemented here — this is the shape an HTTP layer
//! would serialize, not the HTTP layer itself.

use serde::{Deserialize, Serialize, Serializer};

use crate::engine::{default_iterations, ItemCost};
use crate::model::Configuration;

#[derive(Debug, Clone, Deserialize)]
pub struct ComputeCostsRequest {
    pub config: Configuration,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComputeCostsResponse {
    pub costs: Vec<ItemCost>,
}

impl Serialize for ItemCost {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ItemCost", 3)?;
        state.serialize_field("item", &self.item)?;
        if self.cost.is_nan() {
            state.serialize_field("cost", &Option::<f64>::None)?;
        } else if self.cost.is_infinite() {
            state.serialize_field("cost", "Infinity")?;
        } else {
            state.serialize_field("cost", &self.cost)?;
        }
        state.serialize_field("transformation_costs", &self.transformation_costs)?;
        state.end()
    }
}
