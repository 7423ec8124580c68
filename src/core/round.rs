//! Result-assembly rounding

/// Round to a fixed number of decimal places, halves away from zero
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}

/// Round a money amount to cents
pub fn money(value: f64) -> f64 {
    round_to(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to(21.5205, 2), 21.52);
        assert_eq!(round_to(0.26999, 3), 0.27);
        assert_eq!(round_to(1.0833, 1), 1.1);
        assert_eq!(round_to(-2.391, 2), -2.39);
    }

    #[test]
    fn test_money() {
        assert_eq!(money(2152.0466), 2152.05);
        assert_eq!(money(0.5), 0.5);
    }
}
