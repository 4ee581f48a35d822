use std::fmt::Write as _;

use crate::config::{
    Config,
    constants::{IDLE_THRESHOLD_RANGE_MS, NAV_WINDOW_RANGE_MS},
};

pub fn find_out_of_range_windows(nav_window_ms: u32, idle_threshold_ms: u32) -> Option<String> {
    let checks = [
        ("navigation window", nav_window_ms, NAV_WINDOW_RANGE_MS),
        ("idle threshold", idle_threshold_ms, IDLE_THRESHOLD_RANGE_MS),
    ];

    let out_of_range: Vec<_> = checks
        .iter()
        .filter(|(_, value, range)| !range.contains(value))
        .collect();

    if out_of_range.is_empty() {
        return None;
    }

    let mut error = String::from("Timing windows out of range:\n\n");
    for (name, value, range) in &out_of_range {
        let _ = writeln!(
            error,
            "- {name}: {value} ms (accepted {}..={} ms)",
            range.start(),
            range.end()
        );
    }
    error.push_str("\nAdjust the value or delete the entry to fall back to the default.");
    Some(error)
}

impl Config {
    pub fn validate(&self) -> Result<(), String> {
        match find_out_of_range_windows(self.nav_window_ms, self.idle_threshold_ms) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
