//! Engine configuration.

use ash_family::FamilyConfig;

/// Configuration for an [`Engine`](crate::Engine).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Configuration given to every family the engine creates.
    pub family: FamilyConfig,
}

impl EngineConfig {
    /// Builder method to set the family configuration.
    #[must_use]
    pub fn with_family(mut self, family: FamilyConfig) -> Self {
        self.family = family;
        self
    }
}
