use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportEmission {
    pub name: String,
    pub emoji: Option<String>,
    /// One-way emissions for the requested distance.
    pub kgco2e: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Equivalent {
    pub emoji: String,
    pub label: String,
    /// kg CO2e represented by one unit of this item.
    pub unit_kgco2e: f64,
}
