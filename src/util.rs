pub fn mean(data: &[f64]) -> Option<f64> {
    let sum = data.iter().sum::<f64>();
    let count = data.len();

    match count {
        positive if positive > 0 => Some(sum / count as f64),
        _ => None,
    }
}

/// Round to a fixed number of decimal places. Exact halves go to the even digit;
/// a product that only looks like a half after scaling rounds toward its true value.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    let scaled = value * factor;
    if (scaled - scaled.trunc()).abs() != 0.5 {
        return scaled.round() / factor;
    }

    // error of the scaling multiplication, exact under fma
    let residual = value.mul_add(factor, -scaled);
    let rounded = if residual == 0.0 {
        scaled.round_ties_even()
    } else if residual > 0.0 {
        scaled.ceil()
    } else {
        scaled.floor()
    };
    rounded / factor
}

/// `HH:MM:SS`, hours are not wrapped past 99
pub fn format_hms(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// `{hours}h {minutes}m`, leftover seconds are dropped
pub fn format_hours_minutes(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    format!("{h}h {m}m")
}

/// Format a stored percentage as written in the log (`75.0`, `87.5`);
/// `None` means nothing was measured and prints a bare `0`
pub fn format_percent(val: Option<f64>) -> String {
    match val {
        Some(v) => format!("{v:?}"),
        None => "0".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10., 20., 30., 15., 22.]), Some(19.4));
        assert_eq!(mean(&[15., 7., 55., 12., 4.]), Some(18.6));
    }

    #[test]
    fn test_mean_single_value() {
        assert_eq!(mean(&[42.0]), Some(42.0));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(66.666_666, 1), 66.7);
        assert_eq!(round_to(66.666_666, 2), 66.67);
        assert_eq!(round_to(87.5, 2), 87.5);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_round_to_exact_halves_go_even() {
        assert_eq!(round_to(3.125, 2), 3.12);
        assert_eq!(round_to(3.375, 2), 3.38);
        assert_eq!(round_to(66.25, 1), 66.2);
        assert_eq!(round_to(66.75, 1), 66.8);
        assert_eq!(round_to(0.5, 0), 0.0);
        assert_eq!(round_to(1.5, 0), 2.0);
    }

    #[test]
    fn test_round_to_inexact_near_half() {
        // 2.675 is stored just below the half, 1.005 too
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(round_to(0.15, 1), 0.1);
        assert_eq!(round_to(0.35, 1), 0.3);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(65), "00:01:05");
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(100 * 3600 + 59), "100:00:59");
    }

    #[test]
    fn test_format_hours_minutes() {
        assert_eq!(format_hours_minutes(0), "0h 0m");
        assert_eq!(format_hours_minutes(3599), "0h 59m");
        assert_eq!(format_hours_minutes(3600 + 125), "1h 2m");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(None), "0");
        assert_eq!(format_percent(Some(0.0)), "0.0");
        assert_eq!(format_percent(Some(75.0)), "75.0");
        assert_eq!(format_percent(Some(87.5)), "87.5");
        assert_eq!(format_percent(Some(66.67)), "66.67");
    }
}
