//! Connectivity - the online/offline signal and the network sources feeding it.

mod monitor;
mod simulated;

pub use monitor::NetworkMonitor;
pub use simulated::SimulatedNetwork;
