//! [`Runtime`] – service registry.
//!
//! Service implementations register themselves under a `(domain, instance)`
//! address.  Registration is first-come-first-served: a second registration
//! on an occupied address is refused with `false` and the existing stub is
//! left in place.  There is no retry and no error type; the boolean is the
//! whole contract.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{info, warn};

/// The service-side object the runtime serves to remote peers.
///
/// Implementations expose one stable interface name; everything else about
/// the service (its attributes, its collaborators) stays behind the concrete
/// type.
pub trait ServiceStub: Send + Sync {
    /// Stable interface name, e.g. `"vehicle.carinfo.BatteryInfo"`.
    fn interface(&self) -> &str;
}

/// Address a service is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceAddress {
    pub domain: String,
    pub instance: String,
}

impl ServiceAddress {
    fn new(domain: &str, instance: &str) -> Self {
        Self {
            domain: domain.to_string(),
            instance: instance.to_string(),
        }
    }
}

impl std::fmt::Display for ServiceAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.domain, self.instance)
    }
}

/// Central service registry.
///
/// Interior mutability so a single `Runtime` can be shared behind an
/// [`Arc`] and registered against from `&self`.
#[derive(Default)]
pub struct Runtime {
    services: RwLock<HashMap<ServiceAddress, Arc<dyn ServiceStub>>>,
}

impl Runtime {
    /// Create an empty runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `stub` under `(domain, instance)`.
    ///
    /// Returns `true` on success, `false` when the address is already
    /// occupied.  The existing registration is never replaced.
    pub fn register_service(
        &self,
        domain: &str,
        instance: &str,
        stub: Arc<dyn ServiceStub>,
    ) -> bool {
        let address = ServiceAddress::new(domain, instance);
        let mut services = self.services.write().unwrap_or_else(|e| e.into_inner());
        if services.contains_key(&address) {
            warn!(%address, "service registration refused: address occupied");
            return false;
        }
        info!(%address, interface = stub.interface(), "service registered");
        services.insert(address, stub);
        true
    }

    /// Remove the registration at `(domain, instance)`.
    ///
    /// Returns `true` when a stub was removed, `false` when the address was
    /// not registered.
    pub fn unregister_service(&self, domain: &str, instance: &str) -> bool {
        let address = ServiceAddress::new(domain, instance);
        let removed = self
            .services
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&address)
            .is_some();
        if removed {
            info!(%address, "service unregistered");
        }
        removed
    }

    /// Whether a stub is registered at `(domain, instance)`.
    pub fn is_registered(&self, domain: &str, instance: &str) -> bool {
        self.services
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(&ServiceAddress::new(domain, instance))
    }

    /// Resolve the stub registered at `(domain, instance)`.
    pub fn lookup(&self, domain: &str, instance: &str) -> Option<Arc<dyn ServiceStub>> {
        self.services
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&ServiceAddress::new(domain, instance))
            .cloned()
    }

    /// Number of registered services.
    pub fn service_count(&self) -> usize {
        self.services
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}
