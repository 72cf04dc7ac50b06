//! Ports - trait definitions for the engine's external collaborators.
//! Infrastructure crates provide the implementations.

mod connectivity;
mod local_store;
mod remote_source;

pub use connectivity::{Connectivity, InterfaceId, NetworkCallback, NetworkSource, RegistrationId};
pub use local_store::LocalStore;
pub use remote_source::{RemoteResult, RemoteSource, ResponseExt};
