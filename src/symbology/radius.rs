use std::f64::consts::PI;

/// Why a value cannot be turned into a symbol
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RadiusError {
    #[error("negative value {0}")]
    Negative(f64),

    #[error("value is not a finite number")]
    NotFinite,
}

/// Area-proportional sizing: `radius = sqrt(value * scale_factor / π)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    scale_factor: f64,
}

impl RadiusScale {
    pub fn new(scale_factor: f64) -> Self {
        Self { scale_factor }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// The raw formula; negative input gives NaN
    pub fn radius(&self, value: f64) -> f64 {
        let area = value * self.scale_factor;
        (area / PI).sqrt()
    }

    /// Like [`radius`](Self::radius) but rejects values that cannot be drawn
    pub fn checked_radius(&self, value: f64) -> Result<f64, RadiusError> {
        if !value.is_finite() {
            return Err(RadiusError::NotFinite);
        }
        if value < 0.0 {
            return Err(RadiusError::Negative(value));
        }
        Ok(self.radius(value))
    }
}

impl Default for RadiusScale {
    fn default() -> Self {
        Self::new(crate::core::constants::COMPACT_SCALE_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula() {
        let scale = RadiusScale::new(5.0);
        for v in [0.0, 1.0, 10.0, 523.0, 1e6] {
            let expected = (v * 5.0 / PI).sqrt();
            assert!((scale.radius(v) - expected).abs() < 1e-12);
        }
        assert_eq!(scale.radius(0.0), 0.0);
    }

    #[test]
    fn test_area_is_proportional() {
        let scale = RadiusScale::new(50.0);
        let area = |v: f64| PI * scale.radius(v).powi(2);
        assert!((area(200.0) / area(100.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_monotonic() {
        let scale = RadiusScale::default();
        let values = [0.0, 0.5, 1.0, 2.0, 10.0, 100.0, 1000.0, 5000.0];
        for pair in values.windows(2) {
            assert!(scale.radius(pair[0]) <= scale.radius(pair[1]));
        }
    }

    #[test]
    fn test_negative_and_nan() {
        let scale = RadiusScale::default();
        assert!(scale.radius(-1.0).is_nan());
        assert_eq!(scale.checked_radius(-1.0), Err(RadiusError::Negative(-1.0)));
        assert_eq!(scale.checked_radius(f64::NAN), Err(RadiusError::NotFinite));
        assert_eq!(scale.checked_radius(f64::INFINITY), Err(RadiusError::NotFinite));
        assert!(scale.checked_radius(20.0).is_ok());
    }
}
