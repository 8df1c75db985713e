use crate::core::io::traits::MalformedPolicy;
use thiserror::Error;

/// Search radius used when none is given, in Angstroms.
pub const DEFAULT_CONTACT_RADIUS: f64 = 5.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Contact radius must be a finite number (got {0})")]
    NonFiniteRadius(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactConfig {
    /// Atoms at a distance `<= radius` are in contact. A negative radius finds nothing.
    pub radius: f64,
    pub malformed_records: MalformedPolicy,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CONTACT_RADIUS,
            malformed_records: MalformedPolicy::default(),
        }
    }
}

#[derive(Default)]
pub struct ContactConfigBuilder {
    radius: Option<f64>,
    malformed_records: Option<MalformedPolicy>,
}

impl ContactConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }
    pub fn malformed_records(mut self, policy: MalformedPolicy) -> Self {
        self.malformed_records = Some(policy);
        self
    }

    pub fn build(self) -> Result<ContactConfig, ConfigError> {
        let radius = self.radius.unwrap_or(DEFAULT_CONTACT_RADIUS);
        if !radius.is_finite() {
            return Err(ConfigError::NonFiniteRadius(radius));
        }
        Ok(ContactConfig {
            radius,
            malformed_records: self.malformed_records.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_falls_back_to_defaults() {
        let config = ContactConfigBuilder::new().build().unwrap();
        assert_eq!(config, ContactConfig::default());
        assert_eq!(config.radius, 5.0);
        assert_eq!(config.malformed_records, MalformedPolicy::Abort);
    }

    #[test]
    fn builder_applies_every_setting() {
        let config = ContactConfigBuilder::new()
            .radius(4.5)
            .malformed_records(MalformedPolicy::Skip)
            .build()
            .unwrap();
        assert_eq!(config.radius, 4.5);
        assert_eq!(config.malformed_records, MalformedPolicy::Skip);
    }

    #[test]
    fn non_positive_radius_is_allowed() {
        assert_eq!(ContactConfigBuilder::new().radius(0.0).build().unwrap().radius, 0.0);
        assert_eq!(ContactConfigBuilder::new().radius(-1.0).build().unwrap().radius, -1.0);
    }

    #[test]
    fn non_finite_radius_is_rejected() {
        assert_eq!(
            ContactConfigBuilder::new().radius(f64::INFINITY).build(),
            Err(ConfigError::NonFiniteRadius(f64::INFINITY))
        );
        assert!(ContactConfigBuilder::new().radius(f64::NAN).build().is_err());
    }
}
