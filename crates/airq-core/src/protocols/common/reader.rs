/// Round to one fractional digit, the precision every scaled reading is
/// reported with.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::round_to_tenth;

    #[test]
    fn round_to_tenth_drops_float_noise() {
        assert_eq!(round_to_tenth(3.0 * 0.1), 0.3);
        assert_eq!(round_to_tenth(32767.0 * 0.1), 3276.7);
    }

    #[test]
    fn round_to_tenth_keeps_whole_numbers() {
        assert_eq!(round_to_tenth(0.0), 0.0);
        assert_eq!(round_to_tenth(12.0), 12.0);
    }

    #[test]
    fn round_to_tenth_rounds_half_up() {
        assert_eq!(round_to_tenth(0.25), 0.3);
        assert_eq!(round_to_tenth(0.14), 0.1);
    }
}
