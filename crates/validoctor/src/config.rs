//! Configuration for the [`Validoctor`](crate::doctor::Validoctor) façade

use serde::{Deserialize, Serialize};

/// The two execution traits of a [`Validoctor`](crate::doctor::Validoctor).
///
/// Every field has a default, so a partial document deserializes:
///
/// ```rust,ignore
/// let config: ValidoctorConfig = serde_json::from_str(r#"{ "exceptional": true }"#)?;
/// assert!(config.pedantic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidoctorConfig {
    /// Collect every ailment instead of stopping at the first one.
    pub pedantic: bool,
    /// Return an invalid diagnosis as an error instead of a value.
    pub exceptional: bool,
}

impl Default for ValidoctorConfig {
    fn default() -> Self {
        Self {
            pedantic: true,
            exceptional: false,
        }
    }
}

impl ValidoctorConfig {
    /// Create a new configuration with the default traits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail fast: stop at the first ailment and raise it.
    ///
    /// Suited to request guards where any violation rejects the input.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            pedantic: false,
            exceptional: true,
        }
    }

    /// Collect everything and return it (the default).
    ///
    /// Suited to form validation where the client shows every problem at once.
    #[must_use]
    pub const fn exhaustive() -> Self {
        Self {
            pedantic: true,
            exceptional: false,
        }
    }

    /// Sets the pedantic trait.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_pedantic(mut self, pedantic: bool) -> Self {
        self.pedantic = pedantic;
        self
    }

    /// Sets the exceptional trait.
    #[must_use = "builder methods must be chained or built"]
    pub const fn with_exceptional(mut self, exceptional: bool) -> Self {
        self.exceptional = exceptional;
        self
    }
}
