use serde::{Deserialize, Serialize};

/// Ship identifier, e.g. an IMO number or an operator-assigned code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub String);

impl ShipId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A voyage route with its fuel and intensity figures for one reporting year.
///
/// Routes are not ship-scoped: nothing here says which ship sailed the route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route_id: String,
    pub vessel_type: String,
    pub fuel_type: String,
    pub year: i32,
    /// Well-to-wake GHG intensity in gCO2e/MJ
    pub ghg_intensity: f64,
    /// Fuel consumed in tonnes
    pub fuel_consumption: f64,
    pub distance_km: f64,
    /// Total emissions in tonnes
    pub total_emissions: f64,
    pub is_baseline: bool,
}

/// Which ships a route aggregation is attributed to.
///
/// Both variants currently aggregate every route of the requested year,
/// because routes carry no ship identifier. `Ship` only marks the result as
/// belonging to that ship's base CB; the ledger stores it net of the ship's
/// bank entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "ship_id")]
pub enum CbScope {
    Fleet,
    Ship(ShipId),
}

impl CbScope {
    pub fn ship(&self) -> Option<&ShipId> {
        match self {
            CbScope::Fleet => None,
            CbScope::Ship(ship_id) => Some(ship_id),
        }
    }
}

/// Result of a banking operation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BankingOutcome {
    /// Amount actually moved, in gCO2eq
    pub applied: f64,
    /// Balance left in the source after the move
    pub remaining: f64,
}

/// One pool member as supplied by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolMemberInput {
    pub ship_id: ShipId,
    pub cb: f64,
}

impl PoolMemberInput {
    pub fn new(ship_id: impl Into<String>, cb: f64) -> Self {
        Self {
            ship_id: ShipId::new(ship_id),
            cb,
        }
    }
}

/// One pool member after reallocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolAllocation {
    pub ship_id: ShipId,
    pub cb_before: f64,
    pub cb_after: f64,
}

impl PoolAllocation {
    /// Signed change for this member: positive means it received CB.
    pub fn delta(&self) -> f64 {
        self.cb_after - self.cb_before
    }
}

/// Intensity comparison of one value against a baseline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonVerdict {
    pub percent_diff: f64,
    pub compliant: bool,
}

/// Comparison of one route against the baseline route of its scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RouteComparison {
    pub route_id: String,
    pub baseline_route_id: String,
    pub baseline_intensity: f64,
    pub comparison_intensity: f64,
    pub percent_diff: f64,
    pub compliant: bool,
}
