use std::time::Duration;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size label on a base-1024 scale, rounded to the nearest
/// whole unit. Zero formats as "0 Byte".
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Byte".to_string();
    }

    let mut exponent = 0;
    let mut scale = 1u64;
    while exponent < SIZE_UNITS.len() - 1 && bytes >= scale * 1024 {
        scale *= 1024;
        exponent += 1;
    }

    let scaled = bytes as f64 / scale as f64;
    format!("{} {}", scaled.round(), SIZE_UNITS[exponent])
}

/// `minutes:seconds` label, seconds zero-padded to two digits. Minutes are
/// not padded.
pub fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}
