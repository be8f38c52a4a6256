//! Formatting helpers for format-row display strings.

/// Approximate file size shown on a format row, e.g. `~12.3 MB`.
///
/// Always megabytes with one decimal, however small the file, so the rows
/// read uniformly.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn format_approx_size(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    format!("~{:.1} MB", bytes as f64 / MB)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_decimal_megabytes() {
        assert_eq!(format_approx_size(12_897_485), "~12.3 MB");
        assert_eq!(format_approx_size(12 * 1024 * 1024), "~12.0 MB");
        assert_eq!(format_approx_size(1_572_864), "~1.5 MB");
    }

    #[test]
    fn small_files_still_read_as_megabytes() {
        assert_eq!(format_approx_size(500), "~0.0 MB");
        assert_eq!(format_approx_size(0), "~0.0 MB");
    }

    #[test]
    fn gigabyte_range_stays_in_megabytes() {
        assert_eq!(format_approx_size(2 * 1024 * 1024 * 1024), "~2048.0 MB");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn format_approx_size_never_panics(bytes in 0u64..u64::MAX) {
                let label = format_approx_size(bytes);
                prop_assert!(label.starts_with('~'));
                prop_assert!(label.ends_with(" MB"));
            }
        }
    }
}
