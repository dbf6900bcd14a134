//! Per-state price adjustment.
//!
//! Steel and hardware prices vary noticeably across Mexico, so the
//! default catalog is adjusted once, when a workshop onboards, using a
//! flat multiplier per state. A state we do not know about keeps the
//! base price (multiplier 1.0) - that is the documented default, not a
//! failure.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Multiplier per state, 31 states plus Mexico City. Observed range
/// 0.90 to 1.25.
static STATE_PRICE_MULTIPLIERS: Lazy<BTreeMap<&'static str, f64>> = Lazy::new(|| {
    BTreeMap::from([
        ("Aguascalientes", 1.0),
        ("Baja California", 1.15),
        ("Baja California Sur", 1.25),
        ("Campeche", 1.05),
        ("Chiapas", 0.9),
        ("Chihuahua", 1.1),
        ("Coahuila", 1.05),
        ("Colima", 1.0),
        ("Ciudad de México", 1.2),
        ("Durango", 0.95),
        ("Guanajuato", 0.95),
        ("Guerrero", 0.9),
        ("Hidalgo", 0.95),
        ("Jalisco", 1.0),
        ("México", 1.1),
        ("Michoacán", 0.95),
        ("Morelos", 1.05),
        ("Nayarit", 0.95),
        ("Nuevo León", 1.1),
        ("Oaxaca", 0.9),
        ("Puebla", 0.95),
        ("Querétaro", 1.05),
        ("Quintana Roo", 1.15),
        ("San Luis Potosí", 0.95),
        ("Sinaloa", 1.05),
        ("Sonora", 1.1),
        ("Tabasco", 1.0),
        ("Tamaulipas", 1.05),
        ("Tlaxcala", 0.95),
        ("Veracruz", 0.95),
        ("Yucatán", 1.05),
        ("Zacatecas", 0.9),
    ])
});

/// Multiplier for a state name, 1.0 when unlisted.
pub fn multiplier_for(state: &str) -> f64 {
    STATE_PRICE_MULTIPLIERS.get(state).copied().unwrap_or(1.0)
}

/// Base catalog price adjusted for a state, rounded to the nearest
/// whole peso. The adjusted catalog keeps no fractional cents.
pub fn adjusted_price(base_price: f64, state: &str) -> f64 {
    (base_price * multiplier_for(state)).round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_state_applies_multiplier() {
        // 36 * 1.15 = 41.4 -> 41
        assert_eq!(adjusted_price(36.0, "Baja California"), 41.0);
    }

    #[test]
    fn unknown_state_falls_back_to_base_price() {
        assert_eq!(multiplier_for("Atlantis"), 1.0);
        assert_eq!(adjusted_price(36.0, "Atlantis"), 36.0);
    }

    #[test]
    fn fractional_base_rounds_to_nearest_peso() {
        // 1.5 * 1.2 = 1.8 -> 2
        assert_eq!(adjusted_price(1.5, "Ciudad de México"), 2.0);
        // 0.8 * 0.9 = 0.72 -> 1
        assert_eq!(adjusted_price(0.8, "Chiapas"), 1.0);
    }

    #[test]
    fn covers_all_thirty_two_entities() {
        assert_eq!(STATE_PRICE_MULTIPLIERS.len(), 32);
        for (state, multiplier) in STATE_PRICE_MULTIPLIERS.iter() {
            assert!(
                (0.9..=1.25).contains(multiplier),
                "{state} multiplier out of range"
            );
        }
    }

    #[test]
    fn neutral_multiplier_keeps_price() {
        assert_eq!(adjusted_price(36.0, "Jalisco"), 36.0);
    }
}
