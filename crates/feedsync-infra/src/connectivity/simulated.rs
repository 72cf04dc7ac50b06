//! In-process network source whose interfaces are switched by hand.
//!
//! Stands in for the OS connectivity service in tests and in the demo.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError};

use feedsync_core::ConnectivityError;
use feedsync_core::ports::{InterfaceId, NetworkCallback, NetworkSource, RegistrationId};

#[derive(Default)]
struct NetworkState {
    interfaces: BTreeSet<InterfaceId>,
    callbacks: BTreeMap<RegistrationId, Arc<dyn NetworkCallback>>,
    next_registration: RegistrationId,
}

/// Simulated network with a set of up interfaces.
#[derive(Default)]
pub struct SimulatedNetwork {
    state: Mutex<NetworkState>,
}

impl SimulatedNetwork {
    /// A network with no interface up.
    pub fn offline() -> Self {
        Self::default()
    }

    pub fn with_interfaces(interfaces: impl IntoIterator<Item = InterfaceId>) -> Self {
        Self {
            state: Mutex::new(NetworkState {
                interfaces: interfaces.into_iter().collect(),
                ..NetworkState::default()
            }),
        }
    }

    /// Bring an interface up. Callbacks fire even if it was already up.
    pub fn connect(&self, interface: InterfaceId) {
        let callbacks = {
            let mut state = self.lock();
            state.interfaces.insert(interface);
            state.callbacks.values().cloned().collect::<Vec<_>>()
        };

        tracing::debug!(interface, "Simulated interface up");
        for callback in callbacks {
            callback.on_available(interface);
        }
    }

    /// Take an interface down. Unknown interfaces are ignored.
    pub fn disconnect(&self, interface: InterfaceId) {
        let callbacks = {
            let mut state = self.lock();
            if !state.interfaces.remove(&interface) {
                return;
            }
            state.callbacks.values().cloned().collect::<Vec<_>>()
        };

        tracing::debug!(interface, "Simulated interface down");
        for callback in callbacks {
            callback.on_lost(interface);
        }
    }

    pub fn disconnect_all(&self) {
        let interfaces: Vec<InterfaceId> = self.lock().interfaces.iter().copied().collect();
        for interface in interfaces {
            self.disconnect(interface);
        }
    }

    /// Number of live callback registrations.
    pub fn registration_count(&self) -> usize {
        self.lock().callbacks.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NetworkState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NetworkSource for SimulatedNetwork {
    fn active_interfaces(&self) -> Vec<InterfaceId> {
        self.lock().interfaces.iter().copied().collect()
    }

    fn register(
        &self,
        callback: Arc<dyn NetworkCallback>,
    ) -> Result<RegistrationId, ConnectivityError> {
        let mut state = self.lock();
        state.next_registration += 1;
        let registration = state.next_registration;
        state.callbacks.insert(registration, callback);
        Ok(registration)
    }

    fn unregister(&self, registration: RegistrationId) {
        self.lock().callbacks.remove(&registration);
    }
}
