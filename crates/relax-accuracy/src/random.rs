use rand::Rng;

/// Uniform draw from `[min, max)`. Returns `min` when the range is empty.
pub fn next_in_range<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..max)
}

/// Bernoulli trial at `chance` percent. A chance of 0 never rolls the RNG.
pub fn roll_percent<R: Rng + ?Sized>(rng: &mut R, chance: i32) -> bool {
    chance != 0 && rng.gen_range(1..=100) <= chance
}

/// Clamp that never panics: an inverted range resolves to `min`.
pub(crate) fn clamp(value: i32, min: i32, max: i32) -> i32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
