/// Maps a profile's base pattern onto `bins` axis positions.
///
/// A pattern that already has `bins` entries is returned unchanged. Otherwise
/// bin `i` samples the pattern at `i / (bins - 1)` of its span, interpolating
/// linearly between the neighbouring entries. Returns `None` for an empty
/// pattern or zero bins.
pub fn resample(pattern: &[f64], bins: usize) -> Option<Vec<f64>> {
    if pattern.is_empty() || bins == 0 {
        return None;
    }
    if pattern.len() == bins {
        return Some(pattern.to_vec());
    }
    let last = pattern.len() - 1;
    let span = last as f64;
    let steps = bins.saturating_sub(1).max(1) as f64;
    let values = (0..bins)
        .map(|index| {
            let ratio = (index as f64 / steps).clamp(0.0, 1.0);
            let position = ratio * span;
            let lower = (position.floor() as usize).min(last);
            let upper = (lower + 1).min(last);
            let weight = position - lower as f64;
            pattern[lower] + (pattern[upper] - pattern[lower]) * weight
        })
        .collect();
    Some(values)
}
