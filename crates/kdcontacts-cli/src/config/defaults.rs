use kdcontacts::core::io::traits::MalformedPolicy;
use kdcontacts::engine::config::DEFAULT_CONTACT_RADIUS;

/// Values used when neither the command line nor the config file sets a field.
#[derive(Debug, Clone)]
pub struct DefaultsConfig {
    pub radius: f64,
    pub malformed_records: MalformedPolicy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_CONTACT_RADIUS,
            malformed_records: MalformedPolicy::Abort,
        }
    }
}
