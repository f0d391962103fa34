/// Compound-interest projection of a debt.
///
/// Returns `principal * (1 + annual_rate_percent / 100) ^ periods`, rounded to
/// two decimals with half-away-from-zero rounding. Any argument that is not
/// strictly positive (NaN included) yields `0.0`.
pub fn projected_amount(principal: f64, annual_rate_percent: f64, periods: f64) -> f64 {
    let positive = |value: f64| value > 0.0;
    if !(positive(principal) && positive(annual_rate_percent) && positive(periods)) {
        return 0.0;
    }

    let total = principal * (1.0 + annual_rate_percent / 100.0).powf(periods);
    round_cents(total)
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
