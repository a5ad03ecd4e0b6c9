// SPDX-License-Identifier: MPL-2.0
//! Human-readable formatting of playback positions and file sizes.
//!
//! All functions are total: negative and non-finite inputs are treated as
//! zero so that a glitching media clock never produces garbage like `-1:-5`.

/// Sanitizes a seconds value for display.
fn display_secs(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Formats seconds as `M:SS` (minutes are not wrapped into hours).
///
/// Fractional seconds are truncated.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let secs = display_secs(seconds);
    let minutes = (secs / 60.0).floor() as u64;
    let remaining = (secs % 60.0).floor() as u64;
    format!("{minutes}:{remaining:02}")
}

/// Formats seconds as `M:SS.mmm`.
///
/// Milliseconds are truncated, never rounded up into the next second.
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    let secs = display_secs(seconds);
    let minutes = (secs / 60.0).floor() as u64;
    let remaining = (secs % 60.0).floor() as u64;
    let millis = ((secs % 1.0) * 1000.0).floor().min(999.0) as u64;
    format!("{minutes}:{remaining:02}.{millis:03}")
}

/// Formats a byte count using binary units (`B`, `KB`, `MB`, `GB`).
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.2} KB", bytes as f64 / KIB as f64)
    } else if bytes < GIB {
        format!("{:.2} MB", bytes as f64 / MIB as f64)
    } else {
        format!("{:.2} GB", bytes as f64 / GIB as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_pads_seconds() {
        assert_eq!(format_duration(0.0), "0:00");
        assert_eq!(format_duration(5.9), "0:05");
        assert_eq!(format_duration(65.0), "1:05");
        assert_eq!(format_duration(300.0), "5:00");
    }

    #[test]
    fn duration_does_not_wrap_hours() {
        assert_eq!(format_duration(3725.0), "62:05");
    }

    #[test]
    fn timestamp_includes_milliseconds() {
        assert_eq!(format_timestamp(0.0), "0:00.000");
        assert_eq!(format_timestamp(3.5), "0:03.500");
        assert_eq!(format_timestamp(61.25), "1:01.250");
    }

    #[test]
    fn invalid_inputs_format_as_zero() {
        assert_eq!(format_duration(-4.0), "0:00");
        assert_eq!(format_duration(f64::NAN), "0:00");
        assert_eq!(format_timestamp(f64::INFINITY), "0:00.000");
    }

    #[test]
    fn file_size_units() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.50 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10.00 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
