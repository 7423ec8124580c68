//! Material price and density table

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Material used when a design does not name one
pub const DEFAULT_MATERIAL: &str = "aluminum_6061_t6";

/// Price applied to materials missing from the table ($/kg)
pub const FALLBACK_PRICE_PER_KG: f64 = 5.0;

/// Density applied to materials missing from the table (g/cm³)
pub const FALLBACK_DENSITY: f64 = 2.70;

/// Stock material pricing and physical data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Raw stock price in $/kg
    pub price_per_kg: f64,

    /// Density in g/cm³
    pub density: f64,
}

impl Material {
    pub const fn new(price_per_kg: f64, density: f64) -> Self {
        Self {
            price_per_kg,
            density,
        }
    }
}

/// Load the built-in material table
pub fn builtin_materials() -> BTreeMap<String, Material> {
    [
        ("aluminum_6061_t6", Material::new(4.80, 2.70)),
        ("steel_mild", Material::new(2.50, 7.85)),
        ("stainless_304", Material::new(6.20, 8.00)),
        ("plastic_abs", Material::new(3.00, 1.05)),
        ("plastic_pla", Material::new(2.50, 1.25)),
        ("titanium", Material::new(35.00, 4.50)),
    ]
    .into_iter()
    .map(|(name, material)| (name.to_string(), material))
    .collect()
}
