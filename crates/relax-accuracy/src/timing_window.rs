use relax_model::HitWindows;

/// Convert a percentage of the hit windows into a signed millisecond offset.
///
/// The magnitude picks a band: up to 100% spans `0..=w300`, up to 200%
/// spans `w300+1..=w100`, beyond that `w100+1..=w50`. The fractional part
/// interpolates inside the band; whole multiples land on the band's end.
pub fn compute_offset(percentage: i32, windows: &HitWindows) -> i32 {
    let mut multiplier = percentage.unsigned_abs() as f32 / 100.0;

    let (band_start, band_end) = if multiplier <= 1.0 {
        (0, windows.w300)
    } else if multiplier <= 2.0 {
        (windows.w300 + 1, windows.w100)
    } else {
        (windows.w100 + 1, windows.w50)
    };
    let band_length = band_end - band_start;

    if multiplier != 0.0 && multiplier % 1.0 == 0.0 {
        multiplier = 1.0;
    } else {
        multiplier %= 1.0;
    }

    let magnitude = (band_start as f32 + band_length as f32 * multiplier) as i32;
    if percentage < 0 { -magnitude } else { magnitude }
}
