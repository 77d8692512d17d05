/// Size formatting utilities — human-readable byte counts.
///
/// All internal sizes are `u64` bytes. Floating point is only used
/// at the configuration and display-formatting boundaries.

/// Bytes in one binary gigabyte (1024³). Budgets are given in these units.
pub const BYTES_PER_GB: u64 = 1024 * 1024 * 1024;

/// Bytes in one binary megabyte, used for per-cluster figures.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Convert a gigabyte figure into bytes.
///
/// Fractional gigabytes are allowed (`2.5` → 2.5 × 1024³). A fractional
/// byte is dropped: usage in whole bytes exceeds the exact budget exactly
/// when it exceeds the floor. The caller is responsible for rejecting
/// negative or non-finite input; this function saturates rather than wrapping.
pub fn gb_to_bytes(gb: f64) -> u64 {
    let bytes = gb * BYTES_PER_GB as f64;
    if bytes <= 0.0 {
        0
    } else if bytes >= u64::MAX as f64 {
        u64::MAX
    } else {
        bytes.floor() as u64
    }
}

/// Always-in-gigabytes rendering (`"3.10 GB"`), used by the banner and
/// summaries so totals line up against the budget.
pub fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / BYTES_PER_GB as f64)
}

/// Always-in-megabytes rendering, used for per-cluster figures.
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB as f64)
}

/// Format a file count with thousand separators.
pub fn format_count(count: u64) -> String {
    if count < 1_000 {
        return count.to_string();
    }
    let s = count.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
