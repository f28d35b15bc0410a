use std::any::{self, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;

use crate::injector::{AsAny, Injectable, Injector, InjectorFactory};

/// Factory storage keyed by the exact runtime type of the bound target.
///
/// Lookup never consults supertypes or trait implementations; a factory
/// bound for `C` serves targets whose runtime type is `C` and nothing else.
pub(super) struct FactoryMap<K: Injectable + ?Sized> {
    factories: HashMap<TypeId, FactoryEntry<K>>,
}

impl<K: Injectable + ?Sized> FactoryMap<K> {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Binds `factory` under `C`, returning the entry it displaced, if any.
    pub fn insert<C, F>(&mut self, factory: F) -> Option<FactoryEntry<K>>
    where
        C: Injectable,
        F: InjectorFactory<C> + 'static,
    {
        let entry = FactoryEntry {
            target: any::type_name::<C>(),
            factory: Box::new(BoundFactory::<C, F>::new(factory)),
        };
        self.factories.insert(TypeId::of::<C>(), entry)
    }

    pub fn get(&self, type_id: TypeId) -> Option<&FactoryEntry<K>> {
        self.factories.get(&type_id)
    }
}

pub(super) struct FactoryEntry<K: ?Sized> {
    target: &'static str,
    factory: Box<dyn InjectorFactory<K>>,
}

impl<K: Injectable + ?Sized> FactoryEntry<K> {
    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn factory(&self) -> &dyn InjectorFactory<K> {
        self.factory.as_ref()
    }
}

/// Adapts a factory for the concrete type `C` to the kind-level trait object
/// `K` the registry dispatches on.
struct BoundFactory<C, F>
where
    C: Injectable,
    F: InjectorFactory<C>,
{
    inner: F,
    _marker: PhantomData<fn(&mut C)>,
}

impl<C, F> BoundFactory<C, F>
where
    C: Injectable,
    F: InjectorFactory<C>,
{
    fn new(inner: F) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<K, C, F> InjectorFactory<K> for BoundFactory<C, F>
where
    K: Injectable + ?Sized,
    C: Injectable,
    F: InjectorFactory<C>,
{
    fn create(&self) -> Box<dyn Injector<K>> {
        let injector = self.inner.create();
        Box::new(move |target: &mut K| {
            let Some(target) = target.as_any_mut().downcast_mut::<C>() else {
                unreachable!("the factory was looked up by the target's exact type")
            };
            injector.inject(target);
        })
    }
}
