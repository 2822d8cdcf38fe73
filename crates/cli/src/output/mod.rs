//! Output formatting for runs, suite listings and profiles.

pub mod json;
pub mod text;

/// Render milliseconds as `842ms` below a second and `9.8s` above.
pub fn format_millis(ms: u64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}
