//! Tendon length providers.

use hm_core::units::{Length, m};

/// Source of the current tendon length.
///
/// The muscle reads it once per geometry solve and never writes it.
pub trait TendonLength: Send + Sync {
    /// Current tendon length.
    fn tendon_length(&self) -> Length;
}

/// Inextensible tendon of fixed length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTendon {
    length: Length,
}

impl RigidTendon {
    pub fn new(length: Length) -> Self {
        Self { length }
    }

    /// Zero-length tendon: the muscle-tendon length is all muscle belly.
    pub fn none() -> Self {
        Self { length: m(0.0) }
    }
}

impl TendonLength for RigidTendon {
    fn tendon_length(&self) -> Length {
        self.length
    }
}

impl TendonLength for Length {
    fn tendon_length(&self) -> Length {
        *self
    }
}
