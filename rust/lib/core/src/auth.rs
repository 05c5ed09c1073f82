//! Access gate for mutating routes.
//!
//! Handlers do not know how access is decided. They pass the PIN the
//! client submitted with the form and get back `Ok(())` or a
//! `PermissionDenied` error. The concrete gate is chosen at startup.

use tracing::warn;

use crate::ServiceError;

/// Pluggable gate checked by every mutating handler.
pub trait Authenticator: Send + Sync + 'static {
    /// Whether the HTML forms should ask for a PIN at all.
    fn pin_required(&self) -> bool;

    /// Check the PIN submitted with a request.
    fn check(&self, pin: Option<&str>) -> Result<(), ServiceError>;
}

/// Allows everything. Used when no PIN is configured, and in tests.
pub struct AllowAll;

impl Authenticator for AllowAll {
    fn pin_required(&self) -> bool {
        false
    }

    fn check(&self, _pin: Option<&str>) -> Result<(), ServiceError> {
        Ok(())
    }
}

/// Shared-PIN gate: plain equality against a configured secret.
///
/// Not a security boundary. There is no hashing and no rate limiting;
/// it only keeps casual visitors from editing the inventory.
pub struct PinGate {
    pin: String,
}

impl PinGate {
    pub fn new(pin: impl Into<String>) -> Self {
        Self { pin: pin.into() }
    }
}

impl Authenticator for PinGate {
    fn pin_required(&self) -> bool {
        !self.pin.is_empty()
    }

    fn check(&self, pin: Option<&str>) -> Result<(), ServiceError> {
        if self.pin.is_empty() || pin == Some(self.pin.as_str()) {
            return Ok(());
        }
        warn!("rejected request with invalid PIN");
        Err(ServiceError::PermissionDenied("Invalid PIN".into()))
    }
}
