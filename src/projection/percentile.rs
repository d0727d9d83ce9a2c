//! Percentiles by linear interpolation between order statistics

/// Percentile `pct` (0-100) of already sorted values
///
/// `rank = pct/100 * (n-1)`; the result interpolates linearly between the
/// order statistics either side of `rank`. Returns `None` for empty input.
pub fn percentile_sorted(sorted: &[f64], pct: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }

    Some(lerp(sorted[lo], sorted[hi], rank - lo as f64))
}

/// Median of already sorted values; an even count averages the middle pair
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }

    let mid = n / 2;
    if n % 2 == 1 || sorted[mid - 1] == sorted[mid] {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Interpolate from `a` toward `b` (`a <= b`) by `t` in (0, 1)
///
/// The upper half is measured back from `b` so `t` near 1 lands on `b`
/// without rounding drift. Infinite endpoints win outright since
/// `inf - inf` has no value.
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if a == b {
        return a;
    }
    if b.is_infinite() {
        return b;
    }
    if a.is_infinite() {
        return a;
    }

    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Sort terminal values in place, NaN-safe
pub fn sort_values(values: &mut [f64]) {
    values.sort_by(f64::total_cmp);
}

/// Integer part of a percentile (toward zero, not floor, not round)
///
/// Values beyond the `i64` range saturate.
pub fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}
