/// Laser power needed to crack a rock of `mass` at `resistance_pct` (0-100).
pub fn required_power(mass: f64, resistance_pct: f64) -> f64 {
    (mass / (1.0 - resistance_pct / 100.0)) / 5.0
}

/// Outcome of comparing available power with a requirement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub sufficient: bool,
    pub margin: f64,
    pub margin_percent: f64,
}

pub fn compare(available: f64, required: f64) -> Comparison {
    let margin = available - required;
    let margin_percent = if required == 0.0 {
        0.0
    } else {
        100.0 * margin / required
    };
    Comparison {
        sufficient: available >= required,
        margin,
        margin_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_power_scenario() {
        let required = required_power(25000.0, 30.0);
        assert!((required - 7142.857142857143).abs() < 1e-9);
    }

    #[test]
    fn test_zero_resistance() {
        assert_eq!(required_power(10000.0, 0.0), 2000.0);
    }

    #[test]
    fn test_compare_exact_match_is_sufficient() {
        let c = compare(2000.0, 2000.0);
        assert!(c.sufficient);
        assert_eq!(c.margin, 0.0);
        assert_eq!(c.margin_percent, 0.0);
    }

    #[test]
    fn test_compare_shortfall() {
        let c = compare(1000.0, 2000.0);
        assert!(!c.sufficient);
        assert_eq!(c.margin, -1000.0);
        assert_eq!(c.margin_percent, -50.0);
    }

    #[test]
    fn test_compare_zero_requirement() {
        let c = compare(500.0, 0.0);
        assert!(c.sufficient);
        assert_eq!(c.margin_percent, 0.0);
    }
}
