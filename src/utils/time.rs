//! Time display formatting

/// Format a millisecond count as `MM:SS`, zero-padded. Presentation only;
/// core state always stays in integer milliseconds.
pub fn format_mmss(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_zero_padded() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(9_000), "00:09");
        assert_eq!(format_mmss(1_500_000), "25:00");
        assert_eq!(format_mmss(1_497_000), "24:57");
    }

    #[test]
    fn sub_second_remainder_is_floored() {
        assert_eq!(format_mmss(61_999), "01:01");
    }
}
