// Formatting helpers

const MS_PER_SEC: i64 = 1000;
const MS_PER_MIN: i64 = MS_PER_SEC * 60;
const MS_PER_HOUR: i64 = MS_PER_MIN * 60;
const MS_PER_DAY: i64 = MS_PER_HOUR * 24;
const MS_PER_WEEK: i64 = MS_PER_DAY * 7;

/// Render a remaining-seconds count as `H:MM:SS`, or `Dd H:MM:SS` once it spans a day.
///
/// Components are taken with floor division, so negative input wraps into the
/// previous day instead of producing negative minutes (`-1` -> `-1d 23:59:59`).
pub fn format_duration(secs: i64) -> String {
    let mut ms = secs.saturating_mul(MS_PER_SEC);

    let weeks = ms.div_euclid(MS_PER_WEEK);
    ms = ms.rem_euclid(MS_PER_WEEK);
    let mut days = ms.div_euclid(MS_PER_DAY);
    ms = ms.rem_euclid(MS_PER_DAY);
    let hours = ms.div_euclid(MS_PER_HOUR);
    ms = ms.rem_euclid(MS_PER_HOUR);
    let mins = ms.div_euclid(MS_PER_MIN);
    ms = ms.rem_euclid(MS_PER_MIN);
    let s = ms.div_euclid(MS_PER_SEC);

    // weeks only exist as an intermediate step
    days += weeks * 7;

    if days == 0 {
        format!("{}:{:02}:{:02}", hours, mins, s)
    } else {
        format!("{}d {}:{:02}:{:02}", days, hours, mins, s)
    }
}
