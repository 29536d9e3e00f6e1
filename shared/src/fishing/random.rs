use rand::Rng;

/// Fires on average once every `mean_seconds` when polled every frame.
///
/// The per-frame chance is `delta / mean_seconds`, drawn as an integer roll so
/// short frames never round the chance down to zero.
pub fn random_event(mean_seconds: f32, delta: f32, rng: &mut impl Rng) -> bool {
    if delta <= 0.0 {
        return false;
    }
    let upper = (128.0 * mean_seconds / delta) as i64;
    if upper <= 128 {
        return true;
    }
    rng.gen_range(1..=upper) <= 128
}
