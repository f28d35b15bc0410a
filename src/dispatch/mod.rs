mod factory_map;

use std::fmt::{Debug, Formatter, Result as FmtResult};

use snafu::prelude::*;

use crate::dispatch::factory_map::FactoryMap;
use crate::injector::{
    AsAny, InjectError, Injectable, Injector, InjectorFactory, NoFactoryBoundSnafu,
};

/// An immutable registry of injector factories keyed by the exact runtime
/// type of their targets.
///
/// A registry is generic over the *kind* `K` it dispatches on (a trait
/// object such as `dyn Fragment`), while each binding names a concrete
/// target type. It is built once through [`DispatchingInjectorBuilder`] and
/// read-only afterwards, so a shared registry can serve concurrent dispatch
/// to independent targets.
pub struct DispatchingInjector<K: Injectable + ?Sized> {
    factories: FactoryMap<K>,
}

impl<K: Injectable + ?Sized> DispatchingInjector<K> {
    pub fn builder() -> DispatchingInjectorBuilder<K> {
        DispatchingInjectorBuilder::new()
    }

    /// Attempts to inject `target`, reporting whether a factory is bound for
    /// its exact runtime type. A miss performs no mutation.
    pub fn maybe_inject(&self, target: &mut K) -> bool {
        let type_id = (*target).as_any().type_id();
        match self.factories.get(type_id) {
            Some(entry) => {
                entry.factory().create().inject(target);
                true
            }
            None => false,
        }
    }

    /// Injects `target`'s fields with a freshly created injector.
    ///
    /// # Errors
    ///
    /// Fails if no factory is bound for the target's exact runtime type.
    pub fn inject(&self, target: &mut K) -> Result<(), InjectError> {
        let target_name = (*target).type_name();
        ensure!(
            self.maybe_inject(target),
            NoFactoryBoundSnafu {
                target: target_name
            }
        );
        Ok(())
    }
}

impl<K: Injectable + ?Sized> Debug for DispatchingInjector<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("DispatchingInjector<K>")
            .finish_non_exhaustive()
    }
}

/// Accumulates bindings and enforces the one-factory-per-type rule when the
/// registry is finished.
pub struct DispatchingInjectorBuilder<K: Injectable + ?Sized> {
    factories: FactoryMap<K>,
    duplicate: Option<&'static str>,
}

impl<K: Injectable + ?Sized> DispatchingInjectorBuilder<K> {
    pub fn new() -> Self {
        Self {
            factories: FactoryMap::new(),
            duplicate: None,
        }
    }

    /// Binds `factory` to targets whose exact runtime type is `C`.
    pub fn bind<C, F>(mut self, factory: F) -> Self
    where
        C: Injectable,
        F: InjectorFactory<C> + 'static,
    {
        if let Some(previous) = self.factories.insert::<C, _>(factory) {
            self.duplicate.get_or_insert(previous.target());
        }
        self
    }

    /// # Errors
    ///
    /// Fails if some type was bound more than once; the first collision is
    /// reported.
    pub fn build(self) -> Result<DispatchingInjector<K>, BindingError> {
        if let Some(target) = self.duplicate {
            return DuplicateBindingSnafu { target }.fail();
        }
        Ok(DispatchingInjector {
            factories: self.factories,
        })
    }
}

/// Errors raised while assembling a [`DispatchingInjector`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum BindingError {
    #[snafu(display("an injector factory is already bound for {target}"))]
    #[non_exhaustive]
    DuplicateBinding { target: &'static str },
}
