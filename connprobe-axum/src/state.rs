//! Shared router state.

use std::sync::Arc;

use connprobe_driver::{Connector, Validator};

/// State handed to every handler. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    validator: Validator,
}

impl AppState {
    /// State that probes through the native drivers.
    pub fn native() -> Self {
        Self::from_validator(Validator::native())
    }

    /// State that probes through `connector`.
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self::from_validator(Validator::new(connector))
    }

    /// State around an existing validator.
    pub fn from_validator(validator: Validator) -> Self {
        Self { validator }
    }

    /// The request validator.
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::native()
    }
}
