/// Converts raw counts into a conversion percentage.
///
/// Zero visits yields `0.0`. The result is not clamped: more conversions than
/// visits produces a value above `100.0`.
#[must_use]
pub fn conversion_rate(conversions: u64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    (conversions as f64 / visits as f64) * 100.0
}
