//! Compact size labels for plot axes.
//!
//! Labels bucket element counts by power-of-two magnitude and truncate, so
//! `2047` and `1024` both render as `1K`. They are for display only; the raw
//! count stays the authoritative column.

/// Format an element count as `{n}M`, `{n}K`, or the plain decimal.
///
/// Returns an empty string for `0`.
pub fn size_label(count: u64) -> String {
    let hi = count >> 20;
    let mid = count >> 10;
    if hi > 0 {
        format!("{hi}M")
    } else if mid > 0 {
        format!("{mid}K")
    } else if count > 0 {
        count.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(size_label(0), "");
        assert_eq!(size_label(1), "1");
        assert_eq!(size_label(1023), "1023");
        assert_eq!(size_label(1024), "1K");
        assert_eq!(size_label((1 << 20) - 1), "1023K");
        assert_eq!(size_label(1 << 20), "1M");
    }

    #[test]
    fn test_truncates_within_bucket() {
        assert_eq!(size_label(2047), "1K");
        assert_eq!(size_label(2048), "2K");
        assert_eq!(size_label(16 << 10), "16K");
        assert_eq!(size_label((16 << 20) + 12_345), "16M");
        assert_eq!(size_label(256 << 20), "256M");
    }

    #[test]
    fn test_large_counts_stay_in_megabuckets() {
        assert_eq!(size_label(1 << 40), format!("{}M", 1u64 << 20));
        assert_eq!(size_label(u64::MAX), format!("{}M", u64::MAX >> 20));
    }
}
