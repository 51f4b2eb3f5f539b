use crate::params::RegulatoryParams;
use crate::types::{ComparisonVerdict, Route, RouteComparison};

/// Percentage difference of `comparison` relative to `baseline`.
///
/// A zero baseline follows IEEE-754 division (`inf` or `NaN`).
pub fn compute_percent_diff(baseline: f64, comparison: f64) -> f64 {
    ((comparison / baseline) - 1.0) * 100.0
}

/// Whether an intensity meets the default regulatory target.
pub fn is_compliant(ghg_intensity: f64) -> bool {
    RegulatoryParams::default().is_compliant(ghg_intensity)
}

pub fn compare(
    params: &RegulatoryParams,
    baseline_intensity: f64,
    comparison_intensity: f64,
) -> ComparisonVerdict {
    ComparisonVerdict {
        percent_diff: compute_percent_diff(baseline_intensity, comparison_intensity),
        compliant: params.is_compliant(comparison_intensity),
    }
}

/// Compare every route other than `baseline` against it.
///
/// Routes equal to the baseline by `route_id` are skipped, so the caller may
/// pass the whole scope including the baseline itself.
pub fn compare_routes<'a>(
    params: &RegulatoryParams,
    baseline: &Route,
    routes: impl IntoIterator<Item = &'a Route>,
) -> Vec<RouteComparison> {
    routes
        .into_iter()
        .filter(|route| route.route_id != baseline.route_id)
        .map(|route| {
            let verdict = compare(params, baseline.ghg_intensity, route.ghg_intensity);
            RouteComparison {
                route_id: route.route_id.clone(),
                baseline_route_id: baseline.route_id.clone(),
                baseline_intensity: baseline.ghg_intensity,
                comparison_intensity: route.ghg_intensity,
                percent_diff: verdict.percent_diff,
                compliant: verdict.compliant,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(id: &str, ghg_intensity: f64, is_baseline: bool) -> Route {
        Route {
            route_id: id.into(),
            vessel_type: "BulkCarrier".into(),
            fuel_type: "LNG".into(),
            year: 2024,
            ghg_intensity,
            fuel_consumption: 4800.0,
            distance_km: 11_500.0,
            total_emissions: 4_200.0,
            is_baseline,
        }
    }

    #[test]
    fn percent_diff_against_baseline() {
        let diff = compute_percent_diff(91.0, 88.0);
        assert!((diff - (-3.296_703_296_703_3)).abs() < 1e-9);
    }

    #[test]
    fn percent_diff_of_equal_values_is_zero() {
        assert_eq!(compute_percent_diff(89.0, 89.0), 0.0);
    }

    #[test]
    fn percent_diff_with_zero_baseline() {
        assert!(compute_percent_diff(0.0, 88.0).is_infinite());
        assert!(compute_percent_diff(0.0, 0.0).is_nan());
    }

    #[test]
    fn compliance_threshold_is_inclusive() {
        assert!(is_compliant(89.3368));
        assert!(is_compliant(88.0));
        assert!(!is_compliant(89.34));
    }

    #[test]
    fn compare_builds_verdict() {
        let verdict = compare(&RegulatoryParams::default(), 91.0, 88.0);
        assert!(verdict.compliant);
        assert!(verdict.percent_diff < 0.0);
    }

    #[test]
    fn compare_routes_skips_baseline() {
        let baseline = route("R001", 91.0, true);
        let routes = vec![
            baseline.clone(),
            route("R002", 88.0, false),
            route("R003", 93.5, false),
        ];

        let comparisons = compare_routes(&RegulatoryParams::default(), &baseline, &routes);
        assert_eq!(comparisons.len(), 2);

        assert_eq!(comparisons[0].route_id, "R002");
        assert_eq!(comparisons[0].baseline_route_id, "R001");
        assert!(comparisons[0].compliant);
        assert!(comparisons[0].percent_diff < 0.0);

        assert_eq!(comparisons[1].route_id, "R003");
        assert!(!comparisons[1].compliant);
        assert!(comparisons[1].percent_diff > 0.0);
    }
}
