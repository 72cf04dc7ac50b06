//! Connectivity ports.

use std::sync::Arc;

use crate::error::ConnectivityError;

/// Opaque handle of one network interface.
pub type InterfaceId = u64;

/// Handle returned by [`NetworkSource::register`].
pub type RegistrationId = u64;

/// Read side used by the sync repositories.
pub trait Connectivity: Send + Sync {
    /// Last known connectivity. Never waits for a change.
    fn is_online(&self) -> bool;
}

/// Callback invoked by a [`NetworkSource`] as interfaces come and go.
pub trait NetworkCallback: Send + Sync {
    fn on_available(&self, interface: InterfaceId);

    fn on_lost(&self, interface: InterfaceId);
}

/// The OS-level facility reporting network interfaces.
pub trait NetworkSource: Send + Sync {
    /// Interfaces available right now.
    fn active_interfaces(&self) -> Vec<InterfaceId>;

    fn register(
        &self,
        callback: Arc<dyn NetworkCallback>,
    ) -> Result<RegistrationId, ConnectivityError>;

    fn unregister(&self, registration: RegistrationId);
}
