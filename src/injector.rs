use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::marker::PhantomData;
use std::sync::Arc;

use snafu::prelude::*;

pub use crate::util::any::AsAny;

/// A type whose fields may be populated by an injector.
///
/// The marker carries no behavior of its own; it exists so that registries
/// and locators can recover a target's exact runtime type and mutate the
/// target through a kind-level trait object. Every `'static` type is
/// [`Injectable`] through the blanket implementation.
pub trait Injectable: AsAny {}

impl<T> Injectable for T where T: AsAny {}

/// A single-use worker which populates the fields of exactly one target.
///
/// An [`Injector`] is consumed by [`inject`](Injector::inject) and performs
/// its entire effect there; nothing is retained afterwards. Any
/// `FnOnce(&mut C)` closure is an [`Injector`] through the blanket
/// implementation, which is the usual way to write one.
pub trait Injector<C: ?Sized> {
    /// Mutates `target`'s fields, consuming the injector.
    fn inject(self: Box<Self>, target: &mut C);
}

impl<C, F> Injector<C> for F
where
    C: ?Sized,
    F: FnOnce(&mut C),
{
    fn inject(self: Box<Self>, target: &mut C) {
        (*self)(target)
    }
}

/// A factory which hands out a fresh [`Injector`] on every request.
///
/// In convention, a factory is a stateless object shared for the lifetime of
/// the registry holding it and may be used from multiple threads. Each
/// request must receive a newly created injector, never a recycled one, so
/// that no state leaks between targets.
pub trait InjectorFactory<C: ?Sized>: Send + Sync {
    /// Creates an injector for a single target of type `C`.
    fn create(&self) -> Box<dyn Injector<C>>;
}

/// An [`InjectorFactory`] which cuts a fresh single-use injector from a
/// shared closure.
pub struct ClosureFactory<C, F>
where
    C: Injectable,
    F: Fn(&mut C) + Send + Sync + 'static,
{
    action: Arc<F>,
    _marker: PhantomData<fn(&mut C)>,
}

impl<C, F> ClosureFactory<C, F>
where
    C: Injectable,
    F: Fn(&mut C) + Send + Sync + 'static,
{
    pub fn new(action: F) -> Self {
        Self {
            action: Arc::new(action),
            _marker: PhantomData,
        }
    }
}

impl<C, F> Debug for ClosureFactory<C, F>
where
    C: Injectable,
    F: Fn(&mut C) + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ClosureFactory<C, F>").finish_non_exhaustive()
    }
}

impl<C, F> InjectorFactory<C> for ClosureFactory<C, F>
where
    C: Injectable,
    F: Fn(&mut C) + Send + Sync + 'static,
{
    fn create(&self) -> Box<dyn Injector<C>> {
        let action = Arc::clone(&self.action);
        Box::new(move |target: &mut C| action(target))
    }
}

/// Errors raised while locating an injector for a target or dispatching to
/// one.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum InjectError {
    /// The caller handed over a vacant target handle.
    #[snafu(display("no {param} was provided to inject"))]
    #[non_exhaustive]
    NullTarget { param: &'static str },
    /// No container in the target's ancestor chain declares the capability.
    #[snafu(display(
        "No injector was found for {target}: expected {expected_on} to implement HasDispatchingInjector"
    ))]
    #[non_exhaustive]
    NoInjectorSource {
        target: &'static str,
        expected_on: &'static str,
    },
    /// A container declared the capability but its accessor yielded nothing.
    #[snafu(display("{source_type}.dispatching_injector() returned null"))]
    #[non_exhaustive]
    ReturnedNullInjector { source_type: &'static str },
    /// The registry was found but holds no factory for the target's type.
    #[snafu(display("no injector factory is bound for {target}"))]
    #[non_exhaustive]
    NoFactoryBound { target: &'static str },
}
