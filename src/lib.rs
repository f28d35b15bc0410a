#![allow(clippy::new_without_default)]

pub mod dispatch;
pub mod host;
pub mod inject;
pub mod injector;
mod util;

pub mod prelude {
    pub use crate::dispatch::{BindingError, DispatchingInjector, DispatchingInjectorBuilder};
    pub use crate::host::{Activity, Application, Fragment, HasDispatchingInjector, Service};
    pub use crate::inject::{inject_activity, inject_fragment, inject_service};
    pub use crate::injector::{
        AsAny, ClosureFactory, InjectError, Injectable, Injector, InjectorFactory,
    };
}
