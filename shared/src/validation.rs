//! Validation utilities for the Food Rescue Platform

use rust_decimal::Decimal;

use crate::types::Coordinate;

/// Validate a radius for a proximity query
pub fn validate_radius_km(radius_km: f64) -> Result<(), &'static str> {
    if !radius_km.is_finite() {
        return Err("Radius must be a finite number");
    }
    if radius_km <= 0.0 {
        return Err("Radius must be positive");
    }
    Ok(())
}

/// Validate a coordinate is inside the valid latitude/longitude ranges
pub fn validate_coordinate(coordinate: &Coordinate) -> Result<(), &'static str> {
    if !coordinate.is_valid() {
        return Err("Coordinate out of range");
    }
    Ok(())
}

/// Validate a donation quantity
pub fn validate_quantity_kg(quantity_kg: Decimal) -> Result<(), &'static str> {
    if quantity_kg <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a perishability window
pub fn validate_perishability_minutes(minutes: i64) -> Result<(), &'static str> {
    if minutes <= 0 {
        return Err("Perishability window must be positive");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_accepts_presets() {
        for r in crate::types::RADIUS_PRESETS_KM {
            assert!(validate_radius_km(r).is_ok());
        }
    }

    #[test]
    fn radius_rejects_zero_and_negative() {
        assert!(validate_radius_km(0.0).is_err());
        assert!(validate_radius_km(-5.0).is_err());
        assert!(validate_radius_km(f64::NAN).is_err());
    }

    #[test]
    fn coordinate_bounds() {
        assert!(validate_coordinate(&Coordinate::new(45.0, 93.2)).is_ok());
        assert!(validate_coordinate(&Coordinate::new(-90.0, 180.0)).is_ok());
        assert!(validate_coordinate(&Coordinate::new(90.1, 0.0)).is_err());
        assert!(validate_coordinate(&Coordinate::new(0.0, -180.1)).is_err());
    }

    #[test]
    fn quantity_must_be_positive() {
        assert!(validate_quantity_kg(Decimal::from(5)).is_ok());
        assert!(validate_quantity_kg(Decimal::ZERO).is_err());
        assert!(validate_quantity_kg(Decimal::from(-1)).is_err());
    }

    #[test]
    fn perishability_must_be_positive() {
        assert!(validate_perishability_minutes(120).is_ok());
        assert!(validate_perishability_minutes(0).is_err());
        assert!(validate_perishability_minutes(-60).is_err());
    }
}
