//! Broadcast online/offline signal backed by one network source registration.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use feedsync_core::ConnectivityError;
use feedsync_core::ports::{
    Connectivity, InterfaceId, NetworkCallback, NetworkSource, RegistrationId,
};

/// Interface set plus the channel it publishes to. This is what the network
/// source calls back into; it is the only writer of the signal.
struct InterfaceTracker {
    interfaces: Mutex<HashSet<InterfaceId>>,
    online: watch::Sender<bool>,
}

impl InterfaceTracker {
    /// Publish `value`, skipping it when it equals the last published one.
    fn publish(&self, value: bool) {
        let changed = self.online.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });

        if changed {
            tracing::info!(online = value, "Connectivity changed");
        }
    }
}

impl NetworkCallback for InterfaceTracker {
    fn on_available(&self, interface: InterfaceId) {
        self.interfaces
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(interface);
        self.publish(true);
    }

    fn on_lost(&self, interface: InterfaceId) {
        let online = {
            let mut interfaces = self.interfaces.lock().unwrap_or_else(PoisonError::into_inner);
            interfaces.remove(&interface);
            !interfaces.is_empty()
        };
        self.publish(online);
    }
}

/// Process-wide connectivity monitor.
///
/// Registers with its [`NetworkSource`] exactly once, at [`start`](Self::start),
/// and fans the resulting signal out to any number of subscribers through a
/// `watch` channel. A new subscriber sees the current value immediately.
pub struct NetworkMonitor {
    source: Arc<dyn NetworkSource>,
    tracker: Arc<InterfaceTracker>,
    registration: Mutex<Option<RegistrationId>>,
}

impl NetworkMonitor {
    /// Snapshot the currently active interfaces and register for changes.
    pub fn start(source: Arc<dyn NetworkSource>) -> Result<Self, ConnectivityError> {
        let interfaces: HashSet<InterfaceId> = source.active_interfaces().into_iter().collect();
        let online = watch::channel(!interfaces.is_empty()).0;
        let tracker = Arc::new(InterfaceTracker {
            interfaces: Mutex::new(interfaces),
            online,
        });

        let registration = source.register(tracker.clone())?;
        tracing::info!(
            registration,
            online = *tracker.online.borrow(),
            "Network monitor started"
        );

        Ok(Self {
            source,
            tracker,
            registration: Mutex::new(Some(registration)),
        })
    }

    /// Subscribe to the online/offline signal.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tracker.online.subscribe()
    }

    /// Release the network source registration. Safe to call more than once.
    pub fn shutdown(&self) {
        let registration = self
            .registration
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(registration) = registration {
            self.source.unregister(registration);
            tracing::info!(registration, "Network monitor stopped");
        }
    }
}

impl Connectivity for NetworkMonitor {
    fn is_online(&self) -> bool {
        *self.tracker.online.borrow()
    }
}

impl Drop for NetworkMonitor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::SimulatedNetwork;

    #[test]
    fn test_initial_snapshot_follows_active_interfaces() {
        let offline = NetworkMonitor::start(Arc::new(SimulatedNetwork::offline())).unwrap();
        assert!(!offline.is_online());

        let online =
            NetworkMonitor::start(Arc::new(SimulatedNetwork::with_interfaces([1]))).unwrap();
        assert!(online.is_online());
        assert!(*online.subscribe().borrow());
    }

    #[test]
    fn test_lost_interface_keeps_online_while_others_remain() {
        let network = Arc::new(SimulatedNetwork::with_interfaces([1, 2]));
        let monitor = NetworkMonitor::start(network.clone()).unwrap();

        network.disconnect(1);
        assert!(monitor.is_online());

        network.disconnect(2);
        assert!(!monitor.is_online());

        network.connect(3);
        assert!(monitor.is_online());
    }

    #[tokio::test]
    async fn test_duplicate_values_are_not_republished() {
        let network = Arc::new(SimulatedNetwork::offline());
        let monitor = NetworkMonitor::start(network.clone()).unwrap();
        let mut rx = monitor.subscribe();
        assert!(!rx.has_changed().unwrap());

        network.connect(1);
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        // A second interface coming up is still just "online".
        network.connect(2);
        assert!(!rx.has_changed().unwrap());

        network.disconnect_all();
        rx.changed().await.unwrap();
        assert!(!*rx.borrow_and_update());
    }

    #[test]
    fn test_many_subscribers_share_one_registration() {
        let network = Arc::new(SimulatedNetwork::with_interfaces([1]));
        let monitor = NetworkMonitor::start(network.clone()).unwrap();

        let receivers: Vec<_> = (0..8).map(|_| monitor.subscribe()).collect();
        assert_eq!(network.registration_count(), 1);

        network.disconnect(1);
        assert!(receivers.iter().all(|rx| !*rx.borrow()));
    }

    #[test]
    fn test_shutdown_unregisters_once() {
        let network = Arc::new(SimulatedNetwork::with_interfaces([1]));
        let monitor = NetworkMonitor::start(network.clone()).unwrap();

        monitor.shutdown();
        monitor.shutdown();
        assert_eq!(network.registration_count(), 0);

        drop(monitor);
        assert_eq!(network.registration_count(), 0);
    }

    #[test]
    fn test_drop_unregisters() {
        let network = Arc::new(SimulatedNetwork::with_interfaces([1]));
        drop(NetworkMonitor::start(network.clone()).unwrap());
        assert_eq!(network.registration_count(), 0);
    }
}
