//! Standard APIs in Linux

const KB: f64 = 1024.0;
const MB: f64 = KB * 1024.0;
const GB: f64 = MB * 1024.0;
const TB: f64 = GB * 1024.0;

/// Format a byte count with two decimals in the largest unit it exceeds
pub fn bytes_to_human_size(bytes: u64) -> String {
    let bytes = bytes as f64;
    let (amount, unit) = if bytes > TB {
        (bytes / TB, "TB")
    } else if bytes > GB {
        (bytes / GB, "GB")
    } else if bytes > MB {
        (bytes / MB, "MB")
    } else if bytes > KB {
        (bytes / KB, "kB")
    } else {
        (bytes, "B")
    };
    format!("{:.2} {}", amount, unit)
}

#[test]
fn bytes_to_human_size_picks_largest_unit() {
    let reprs = [
        (0, "0.00 B"),
        (1024, "1024.00 B"),
        (1536, "1.50 kB"),
        (5 * 1024 * 1024 + 1, "5.00 MB"),
        (3 * 1024 * 1024 * 1024 + 512 * 1024 * 1024, "3.50 GB"),
        (2 * 1024 * 1024 * 1024 * 1024 + 1, "2.00 TB"),
    ];

    for &(raw, repr) in reprs.iter() {
        assert_eq!(bytes_to_human_size(raw), repr);
    }
}
