//! Size rendering for report output.

/// Unit ladder for [`approx_size`], smallest to largest.
const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];

/// Render a byte count as an approximate magnitude plus unit, dividing by
/// 1000 and climbing the unit ladder while the magnitude is at least 1000.
/// Integer division discards the remainder at every step, so the value is
/// approximate on purpose. The ladder stops at PB; beyond that the
/// magnitude is shown as-is.
pub fn approx_size(bytes: u64) -> String {
    let mut magnitude = bytes;
    let mut unit = 0;
    while magnitude >= 1000 && unit + 1 < UNITS.len() {
        magnitude /= 1000;
        unit += 1;
    }
    format!("~{}{}", magnitude, UNITS[unit])
}
