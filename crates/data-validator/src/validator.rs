//! Sample Validator for Range Checking

use crate::error::ValidationError;
use sample_store::TelemetrySample;
use serde::{Deserialize, Serialize};

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Speed valid range (km/h)
    pub speed_range: (f64, f64),
    /// RPM valid range
    pub rpm_range: (f64, f64),
    /// Latitude valid range (degrees)
    pub latitude_range: (f64, f64),
    /// Longitude valid range (degrees)
    pub longitude_range: (f64, f64),
    /// Heading valid range (degrees)
    pub heading_range: (f64, f64),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            speed_range: (0.0, 300.0),
            rpm_range: (0.0, 8000.0),
            latitude_range: (-90.0, 90.0),
            longitude_range: (-180.0, 180.0),
            heading_range: (0.0, 360.0),
        }
    }
}

/// Validator for incoming telemetry samples
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range, rejecting non-finite input
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < range.0 || value > range.1 {
            return Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            });
        }
        Ok(())
    }

    /// Validate speed
    pub fn validate_speed(&self, speed: f64) -> Result<(), ValidationError> {
        self.validate_range("speed", speed, self.config.speed_range)
    }

    /// Validate RPM
    pub fn validate_rpm(&self, rpm: f64) -> Result<(), ValidationError> {
        self.validate_range("rpm", rpm, self.config.rpm_range)
    }

    /// Validate latitude
    pub fn validate_latitude(&self, latitude: f64) -> Result<(), ValidationError> {
        self.validate_range("latitude", latitude, self.config.latitude_range)
    }

    /// Validate longitude
    pub fn validate_longitude(&self, longitude: f64) -> Result<(), ValidationError> {
        self.validate_range("longitude", longitude, self.config.longitude_range)
    }

    /// Validate heading
    pub fn validate_heading(&self, heading: f64) -> Result<(), ValidationError> {
        self.validate_range("heading", heading, self.config.heading_range)
    }

    /// Validate a whole sample; the first failing field wins
    pub fn validate(&self, sample: &TelemetrySample) -> Result<(), ValidationError> {
        self.validate_speed(sample.speed)?;
        self.validate_rpm(sample.rpm as f64)?;
        if let Some(latitude) = sample.latitude {
            self.validate_latitude(latitude)?;
        }
        if let Some(longitude) = sample.longitude {
            self.validate_longitude(longitude)?;
        }
        if let Some(heading) = sample.heading {
            self.validate_heading(heading)?;
        }
        Ok(())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
