use crate::params::RegulatoryParams;
use crate::types::Route;

/// Compliance balance contribution of one route, in gCO2eq.
///
/// `(TARGET − ghg_intensity) × fuel_consumption_tonnes × ENERGY_PER_TONNE`.
/// Inputs are trusted; a negative fuel figure is not rejected.
pub fn compute_cb(ghg_intensity: f64, fuel_consumption_tonnes: f64) -> f64 {
    RegulatoryParams::default().compute_cb(ghg_intensity, fuel_consumption_tonnes)
}

/// Sum of [`compute_cb`] over every route supplied.
///
/// The caller decides which routes belong to a ship-year; see
/// [`CbScope`](crate::types::CbScope) for the current attribution rule.
pub fn aggregate_cb<'a>(routes: impl IntoIterator<Item = &'a Route>) -> f64 {
    aggregate_cb_with(&RegulatoryParams::default(), routes)
}

/// [`aggregate_cb`] over explicit regulatory parameters.
pub fn aggregate_cb_with<'a>(
    params: &RegulatoryParams,
    routes: impl IntoIterator<Item = &'a Route>,
) -> f64 {
    routes.into_iter().fold(0.0, |acc, route| {
        acc + params.compute_cb(route.ghg_intensity, route.fuel_consumption)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ENERGY_PER_TONNE, TARGET_INTENSITY};

    fn route(id: &str, ghg_intensity: f64, fuel_consumption: f64) -> Route {
        Route {
            route_id: id.into(),
            vessel_type: "Container".into(),
            fuel_type: "HFO".into(),
            year: 2024,
            ghg_intensity,
            fuel_consumption,
            distance_km: 12_000.0,
            total_emissions: 4_500.0,
            is_baseline: false,
        }
    }

    #[test]
    fn on_target_is_zero() {
        assert_eq!(compute_cb(TARGET_INTENSITY, 1000.0), 0.0);
    }

    #[test]
    fn below_target_is_surplus() {
        let cb = compute_cb(85.0, 1000.0);
        let expected = (TARGET_INTENSITY - 85.0) * (1000.0 * ENERGY_PER_TONNE);
        assert_eq!(cb, expected);
        assert!(cb > 0.0);
    }

    #[test]
    fn above_target_is_deficit() {
        let cb = compute_cb(95.0, 1000.0);
        let expected = (TARGET_INTENSITY - 95.0) * (1000.0 * ENERGY_PER_TONNE);
        assert_eq!(cb, expected);
        assert!(cb < 0.0);
    }

    #[test]
    fn zero_fuel_is_zero_for_any_intensity() {
        for intensity in [0.0, 50.0, TARGET_INTENSITY, 90.0, 250.0] {
            assert_eq!(compute_cb(intensity, 0.0), 0.0);
        }
    }

    #[test]
    fn large_consumption_stays_precise() {
        let cb = compute_cb(90.0, 10_000.0);
        let expected = (TARGET_INTENSITY - 90.0) * 10_000.0 * ENERGY_PER_TONNE;
        assert!((cb - expected).abs() < 0.01);
    }

    #[test]
    fn aggregate_sums_routes() {
        let routes = vec![
            route("R001", 91.0, 5000.0),
            route("R002", 88.0, 4800.0),
            route("R003", 93.5, 5100.0),
        ];
        let expected = compute_cb(91.0, 5000.0) + compute_cb(88.0, 4800.0) + compute_cb(93.5, 5100.0);
        let total = aggregate_cb(&routes);
        assert!((total - expected).abs() < 1e-3);
        assert!(total < 0.0);
    }

    #[test]
    fn aggregate_of_nothing_is_zero() {
        let routes: Vec<Route> = Vec::new();
        let total = aggregate_cb(&routes);
        assert_eq!(total, 0.0);
        assert!(total.is_sign_positive());
    }

    #[test]
    fn aggregate_with_custom_params() {
        let params = RegulatoryParams {
            target_intensity: 100.0,
            energy_per_tonne: 1.0,
        };
        let routes = vec![route("R1", 90.0, 2.0), route("R2", 110.0, 1.0)];
        assert_eq!(aggregate_cb_with(&params, &routes), 10.0);
    }
}
