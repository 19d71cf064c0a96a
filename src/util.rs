use std::time::Duration;

/// Round to the nearest whole second, halves rounding up
pub fn round_to_secs(d: Duration) -> u64 {
    let millis = d.as_millis();
    ((millis + 500) / 1000) as u64
}

/// `MM:SS`, or `H:MM:SS` once an hour or more remains
pub fn format_clock(d: Duration) -> String {
    let secs = round_to_secs(d);
    let (hours, mins, secs) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{}:{:0>2}:{:0>2}", hours, mins, secs)
    } else {
        format!("{:0>2}:{:0>2}", mins, secs)
    }
}

/// Saturates instead of overflowing for absurd counts
pub fn minutes(n: u64) -> Duration {
    Duration::from_secs(n.saturating_mul(60))
}
