use proptest::prelude::*;
use vecpeek_dump::distance::{cosine_distance, dot_product, euclidean_distance_squared};
use vecpeek_dump::DistanceMetric;

proptest! {
    #[test]
    fn test_cosine_distance_in_range(
        a in proptest::collection::vec(-1.0f32..1.0f32, 1..64),
        b in proptest::collection::vec(-1.0f32..1.0f32, 1..64)
    ) {
        let len = a.len().min(b.len());
        let (a, b) = (&a[..len], &b[..len]);
        prop_assume!(dot_product(a, a) > 1e-6 && dot_product(b, b) > 1e-6);

        let d = cosine_distance(a, b);
        prop_assert!((-1e-4..=2.0 + 1e-4).contains(&d));
    }

    #[test]
    fn test_l2_symmetric_and_non_negative(
        a in proptest::collection::vec(-10.0f32..10.0f32, 0..64),
        b in proptest::collection::vec(-10.0f32..10.0f32, 0..64)
    ) {
        let len = a.len().min(b.len());
        let (a, b) = (&a[..len], &b[..len]);

        let ab = euclidean_distance_squared(a, b);
        let ba = euclidean_distance_squared(b, a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() < 1e-3);
    }

    #[test]
    fn test_ip_matches_naive(
        a in proptest::collection::vec(-1.0f32..1.0f32, 0..64),
        b in proptest::collection::vec(-1.0f32..1.0f32, 0..64)
    ) {
        let len = a.len().min(b.len());
        let (a, b) = (&a[..len], &b[..len]);

        let naive: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        prop_assert!((dot_product(a, b) - naive).abs() < 1e-4);
        prop_assert!((DistanceMetric::Ip.compute(a, b) - (1.0 - naive)).abs() < 1e-4);
    }
}
