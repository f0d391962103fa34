/*!
 * Tests for the compound-interest projection
 */

use mortydex::projected_amount;

#[test]
fn test_projection_reference_value() {
    assert_eq!(projected_amount(1000.0, 5.0, 12.0), 1795.86);
}

#[test]
fn test_projection_should_be_zero_for_any_non_positive_input() {
    let samples = [-10.0, 0.0, 10.0];
    for p in samples {
        for r in samples {
            for n in samples {
                let amount = projected_amount(p, r, n);
                if p <= 0.0 || r <= 0.0 || n <= 0.0 {
                    assert_eq!(amount, 0.0, "p={} r={} n={}", p, r, n);
                } else {
                    assert!(amount > p);
                }
            }
        }
    }
}

#[test]
fn test_projection_should_have_at_most_two_decimals() {
    for (p, r, n) in [(1234.56, 3.3, 7.0), (99.99, 12.5, 3.0), (0.01, 100.0, 10.0)] {
        let amount = projected_amount(p, r, n);
        let cents = amount * 100.0;
        assert!((cents - cents.round()).abs() < 1e-6, "{} has more than two decimals", amount);
    }
}

#[test]
fn test_projection_should_be_deterministic() {
    assert_eq!(projected_amount(500.0, 2.0, 24.0), projected_amount(500.0, 2.0, 24.0));
}
