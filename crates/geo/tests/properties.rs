//! Property tests for the siting primitives.

use h2map_geo::{
    buffer, centroid, cluster, contains, destination_point, haversine_distance, nearest, optimal_location,
    Bounds, ClusterCount, Coordinate, DemandCenter, GeoError, RenewableSource, SitingEstimator,
};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

/// Mid-latitude points away from the antimeridian, where planar containment holds.
fn mapped_coordinate() -> impl Strategy<Value = Coordinate> {
    (-60.0f64..=60.0, -170.0f64..=170.0).prop_map(|(lat, lng)| Coordinate::new(lat, lng))
}

/// Any finite non-negative magnitude, from small counts up to `f64::MAX`.
fn magnitude() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0f64), 0.0f64..1e3, 1e3f64..1e30, 1e30f64..=f64::MAX]
}

fn sorted(mut points: Vec<Coordinate>) -> Vec<Coordinate> {
    points.sort_by(|a, b| a.lat.total_cmp(&b.lat).then(a.lng.total_cmp(&b.lng)));
    points
}

proptest! {
    #[test]
    fn distance_is_symmetric_and_non_negative(a in coordinate(), b in coordinate()) {
        let ab = haversine_distance(&a, &b);
        let ba = haversine_distance(&b, &a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-9);
        prop_assert_eq!(haversine_distance(&a, &a), 0.0);
    }

    #[test]
    fn distance_triangle_inequality(a in mapped_coordinate(), db in 0.0f64..2.0, dc in 0.0f64..2.0) {
        let b = Coordinate::new(a.lat + db, a.lng - dc);
        let c = Coordinate::new(a.lat - dc, a.lng + db);
        let ab = haversine_distance(&a, &b);
        let bc = haversine_distance(&b, &c);
        let ac = haversine_distance(&a, &c);
        prop_assert!(ac <= ab + bc + 1e-9);
    }

    #[test]
    fn buffer_vertices_sit_on_radius(center in mapped_coordinate(), radius in 1.0f64..500.0) {
        let zone = buffer(&center, radius).unwrap();
        prop_assert_eq!(zone.ring().first(), zone.ring().last());
        for v in zone.vertices() {
            let d = haversine_distance(&center, v);
            prop_assert!((d - radius).abs() / radius < 0.02, "vertex at {} for radius {}", d, radius);
        }
    }

    #[test]
    fn buffer_contains_center_but_not_far_points(
        center in mapped_coordinate(),
        radius in 5.0f64..200.0,
        bearing in 0.0f64..360.0,
    ) {
        let zone = buffer(&center, radius).unwrap();
        prop_assert!(contains(&center, &zone).unwrap());
        let outside = destination_point(&center, bearing, radius * 1.5);
        prop_assert!(!contains(&outside, &zone).unwrap());
    }

    #[test]
    fn nearest_is_sorted_and_sized(
        target in coordinate(),
        points in prop::collection::vec(coordinate(), 0..40),
        k in 0usize..50,
    ) {
        let ranked = nearest(&target, points.clone(), k);
        prop_assert_eq!(ranked.len(), k.min(points.len()));
        for w in ranked.windows(2) {
            prop_assert!(w[0].distance <= w[1].distance);
        }
    }

    #[test]
    fn centroid_within_bounds(points in prop::collection::vec(coordinate(), 1..50)) {
        let c = centroid(&points).unwrap();
        let b = Bounds::from_points(&points).unwrap();
        // summation rounding may overshoot the box by a few ulps
        let eps = 1e-9;
        prop_assert!(c.lat >= b.south - eps && c.lat <= b.north + eps);
        prop_assert!(c.lng >= b.west - eps && c.lng <= b.east + eps);
    }

    #[test]
    fn clustering_partitions_input(points in prop::collection::vec(mapped_coordinate(), 0..60)) {
        let groups = cluster(&points, ClusterCount::Auto).unwrap();
        prop_assert!(groups.len() <= (points.len() / 3).max(1));
        prop_assert!(groups.iter().all(|g| !g.is_empty()));
        let flat: Vec<Coordinate> = groups.iter().flatten().copied().collect();
        prop_assert_eq!(sorted(flat), sorted(points.clone()));
        prop_assert_eq!(cluster(&points, ClusterCount::Auto).unwrap(), groups);
    }

    #[test]
    fn small_inputs_form_one_cluster(points in prop::collection::vec(coordinate(), 1..=3)) {
        let groups = cluster(&points, ClusterCount::Auto).unwrap();
        prop_assert_eq!(groups, vec![points]);
    }

    #[test]
    fn site_stays_inside_inputs_for_any_magnitude(
        demand in prop::collection::vec((mapped_coordinate(), magnitude()), 2..6),
        supply in prop::collection::vec((mapped_coordinate(), magnitude()), 0..4),
    ) {
        let demand: Vec<DemandCenter> = demand.into_iter().map(|(c, v)| DemandCenter::new(c, v)).collect();
        let supply: Vec<RenewableSource> = supply.into_iter().map(|(c, v)| RenewableSource::new(c, v)).collect();

        let estimate = SitingEstimator::default().estimate(&demand, &supply).unwrap();

        if estimate.used_fallback {
            prop_assert!(demand.iter().all(|d| d.estimated_demand == 0.0));
            prop_assert!(supply.iter().all(|s| s.capacity == 0.0));
        } else {
            let site = estimate.location;
            prop_assert!(site.lat.is_finite() && site.lng.is_finite());

            let inputs: Vec<Coordinate> = demand
                .iter()
                .map(|d| d.coordinate)
                .chain(supply.iter().map(|s| s.coordinate))
                .collect();
            let bounds = Bounds::from_points(&inputs).unwrap();
            let eps = 1e-9;
            prop_assert!(site.lat >= bounds.south - eps && site.lat <= bounds.north + eps, "lat {}", site.lat);
            prop_assert!(site.lng >= bounds.west - eps && site.lng <= bounds.east + eps, "lng {}", site.lng);
        }
    }

    #[test]
    fn single_demand_center_is_its_own_site(c in coordinate(), demand in 0.001f64..1e6) {
        prop_assert_eq!(optimal_location(&[DemandCenter::new(c, demand)], &[]).unwrap(), c);
    }
}

#[test]
fn centroid_of_nothing_fails() {
    assert!(matches!(centroid(&[]), Err(GeoError::EmptyInput(_))));
}

#[test]
fn siting_without_data_falls_back_to_us_center() {
    assert_eq!(optimal_location(&[], &[]).unwrap(), Coordinate::new(39.8283, -98.5795));
}

#[test]
fn siting_mixes_demand_and_supply() {
    let demand = [DemandCenter::new(Coordinate::new(40.0, -100.0), 200.0)];
    let supply = [RenewableSource::new(Coordinate::new(40.0, -94.0), 50.0)];
    // 2 demand points at -100, 1 supply point at -94
    let site = optimal_location(&demand, &supply).unwrap();
    assert_eq!(site, Coordinate::new(40.0, -98.0));
}
