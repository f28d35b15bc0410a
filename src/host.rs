//! The host-framework boundary.
//!
//! The crate never constructs or mutates these containers; the host
//! framework supplies the hierarchy, and the locator in [`crate::inject`]
//! only walks it. Parent links are owned `Arc` handles so a registry
//! resolved from an ancestor stays usable while the target itself is
//! mutated.
//!
//! Capability discovery is by accessor: every container trait carries
//! `*_injector_source` methods which default to `None`. A container that
//! wants to provide injectors for some kind overrides the accessor to return
//! `Some(self)` and implements [`HasDispatchingInjector`] for that kind.

use std::sync::Arc;

use crate::dispatch::DispatchingInjector;
use crate::injector::{AsAny, Injectable};

/// A container able to hand out the injector registry for targets of kind
/// `K`.
pub trait HasDispatchingInjector<K>: AsAny
where
    K: Injectable + ?Sized,
{
    /// Returns the registry used to inject targets of kind `K`, or `None`
    /// when the container declares the capability but has nothing to offer.
    /// The latter is an error at injection time, not an invitation to keep
    /// searching.
    fn dispatching_injector(&self) -> Option<&DispatchingInjector<K>>;
}

/// The root container of the hierarchy.
pub trait Application {
    fn activity_injector_source(&self) -> Option<&dyn HasDispatchingInjector<dyn Activity>> {
        None
    }

    fn fragment_injector_source(&self) -> Option<&dyn HasDispatchingInjector<dyn Fragment>> {
        None
    }

    fn service_injector_source(&self) -> Option<&dyn HasDispatchingInjector<dyn Service>> {
        None
    }
}

/// A top-level unit owned directly by the application.
pub trait Activity: Injectable {
    fn application(&self) -> Arc<dyn Application>;

    fn fragment_injector_source(&self) -> Option<&dyn HasDispatchingInjector<dyn Fragment>> {
        None
    }
}

/// A nested unit owned by an activity, or by another fragment.
pub trait Fragment: Injectable {
    fn parent_fragment(&self) -> Option<Arc<dyn Fragment>>;

    fn activity(&self) -> Option<Arc<dyn Activity>>;

    fn fragment_injector_source(&self) -> Option<&dyn HasDispatchingInjector<dyn Fragment>> {
        None
    }
}

/// A background unit owned directly by the application.
pub trait Service: Injectable {
    fn application(&self) -> Arc<dyn Application>;
}
