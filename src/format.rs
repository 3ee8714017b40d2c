use core::fmt::Write;

use heapless::String;

use crate::filters::abs;

/// Renders a voltage with exactly two decimal places, no allocation.
///
/// Both parts are truncated toward zero, not rounded: `3.14159` renders as
/// `"3.14"`. Negative inputs carry an explicit leading sign, so `-0.5`
/// renders as `"-0.50"`.
pub fn format_voltage(volts: f32) -> String<16> {
    let whole = volts as i32;
    let frac = (abs(volts - whole as f32) * 100.0) as u32;

    let mut out = String::new();
    if volts < 0.0 {
        let _ = out.push('-');
    }
    let _ = write!(out, "{}.{:02}", whole.unsigned_abs(), frac);
    out
}
