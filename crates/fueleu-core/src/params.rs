use serde::{Deserialize, Serialize};

/// Regulatory GHG-intensity target in gCO2e/MJ.
pub const TARGET_INTENSITY: f64 = 89.3368;

/// Lower calorific value used to convert fuel mass into energy, in MJ/tonne.
pub const ENERGY_PER_TONNE: f64 = 41_000.0;

/// Regulatory parameters shared by the calculator and the comparison evaluator.
///
/// Both components read the target from this one struct, so the compliance
/// verdict and the sign of a computed CB can never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatoryParams {
    /// GHG-intensity target in gCO2e/MJ
    pub target_intensity: f64,
    /// Energy content of one tonne of fuel, in MJ
    pub energy_per_tonne: f64,
}

impl Default for RegulatoryParams {
    fn default() -> Self {
        Self {
            target_intensity: TARGET_INTENSITY,
            energy_per_tonne: ENERGY_PER_TONNE,
        }
    }
}

impl RegulatoryParams {
    /// Energy-weighted compliance delta for one route, in gCO2eq.
    pub fn compute_cb(&self, ghg_intensity: f64, fuel_consumption_tonnes: f64) -> f64 {
        let energy = fuel_consumption_tonnes * self.energy_per_tonne;
        (self.target_intensity - ghg_intensity) * energy
    }

    /// An intensity exactly on the target is compliant.
    pub fn is_compliant(&self, ghg_intensity: f64) -> bool {
        ghg_intensity <= self.target_intensity
    }
}
