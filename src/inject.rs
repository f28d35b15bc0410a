//! Entry points which locate an injector through a target's ancestor chain
//! and dispatch to it.

use std::iter;
use std::sync::Arc;

use snafu::prelude::*;

use crate::dispatch::DispatchingInjector;
use crate::host::{Activity, Application, Fragment, HasDispatchingInjector, Service};
use crate::injector::{
    AsAny, InjectError, Injectable, NoInjectorSourceSnafu, NullTargetSnafu,
    ReturnedNullInjectorSnafu,
};

/// Injects the fields of `activity` with the registry provided by its
/// application.
///
/// # Errors
///
/// Fails when `activity` is vacant, when the application does not provide
/// activity injectors, when its accessor yields no registry, or when the
/// registry holds no factory for the activity's exact runtime type.
pub fn inject_activity(activity: Option<&mut dyn Activity>) -> Result<(), InjectError> {
    let activity = activity.context(NullTargetSnafu { param: "activity" })?;
    let target = (*activity).type_name();
    let application = activity.application();

    let injector = find_injector(
        iter::once(application.activity_injector_source()),
        target,
        "the application",
    )?;
    injector.inject(activity)
}

/// Injects the fields of `fragment` with the registry provided by the
/// nearest eligible container: its parent fragments walked outwards, then
/// its activity, then the application.
///
/// # Errors
///
/// Fails when `fragment` is vacant, when no container in the chain provides
/// fragment injectors, when the nearest provider's accessor yields no
/// registry, or when the registry holds no factory for the fragment's exact
/// runtime type.
pub fn inject_fragment(fragment: Option<&mut dyn Fragment>) -> Result<(), InjectError> {
    let fragment = fragment.context(NullTargetSnafu { param: "fragment" })?;
    let target = (*fragment).type_name();

    let parents: Vec<Arc<dyn Fragment>> =
        iter::successors(fragment.parent_fragment(), |parent| parent.parent_fragment())
            .collect();
    let activity = fragment.activity();
    let application = activity.as_ref().map(|activity| activity.application());

    let chain = parents
        .iter()
        .map(|parent| parent.fragment_injector_source())
        .chain(
            activity
                .iter()
                .map(|activity| activity.fragment_injector_source()),
        )
        .chain(
            application
                .iter()
                .map(|application| application.fragment_injector_source()),
        );

    let injector = find_injector(
        chain,
        target,
        "a parent fragment, the activity, or the application",
    )?;
    injector.inject(fragment)
}

/// Injects the fields of `service` with the registry provided by its
/// application.
///
/// # Errors
///
/// Fails for the same reasons as [`inject_activity`], with "service" as the
/// parameter name.
pub fn inject_service(service: Option<&mut dyn Service>) -> Result<(), InjectError> {
    let service = service.context(NullTargetSnafu { param: "service" })?;
    let target = (*service).type_name();
    let application = service.application();

    let injector = find_injector(
        iter::once(application.service_injector_source()),
        target,
        "the application",
    )?;
    injector.inject(service)
}

/// Walks the capability views of a container chain, nearest first.
///
/// The first container declaring the capability decides the outcome: its
/// accessor either yields the registry or fails the whole resolution.
/// Containers without the capability are skipped; an exhausted chain means
/// no injector exists for the target.
fn find_injector<'a, K, I>(
    chain: I,
    target: &'static str,
    expected_on: &'static str,
) -> Result<&'a DispatchingInjector<K>, InjectError>
where
    K: Injectable + ?Sized,
    I: IntoIterator<Item = Option<&'a dyn HasDispatchingInjector<K>>>,
{
    for candidate in chain {
        let Some(source) = candidate else {
            continue;
        };
        return source
            .dispatching_injector()
            .context(ReturnedNullInjectorSnafu {
                source_type: source.type_name(),
            });
    }
    NoInjectorSourceSnafu {
        target,
        expected_on,
    }
    .fail()
}

#[cfg(test)]
mod tests {
    use crate::injector::ClosureFactory;

    use super::*;

    #[derive(Default)]
    struct Pin {
        note: String,
    }

    impl Fragment for Pin {
        fn parent_fragment(&self) -> Option<Arc<dyn Fragment>> {
            None
        }

        fn activity(&self) -> Option<Arc<dyn Activity>> {
            None
        }
    }

    struct Shelf {
        registry: Option<DispatchingInjector<dyn Fragment>>,
    }

    impl HasDispatchingInjector<dyn Fragment> for Shelf {
        fn dispatching_injector(&self) -> Option<&DispatchingInjector<dyn Fragment>> {
            self.registry.as_ref()
        }
    }

    fn pin_registry(note: &'static str) -> DispatchingInjector<dyn Fragment> {
        DispatchingInjector::builder()
            .bind(ClosureFactory::new(move |pin: &mut Pin| {
                pin.note = note.to_owned();
            }))
            .build()
            .unwrap()
    }

    #[test]
    fn find_injector_skips_containers_without_the_capability() {
        let shelf = Shelf {
            registry: Some(pin_registry("found")),
        };

        let injector = find_injector(
            vec![None, Some(&shelf as &dyn HasDispatchingInjector<dyn Fragment>)],
            "Pin",
            "somewhere",
        )
        .unwrap();

        let mut pin = Pin::default();
        injector.inject(&mut pin as &mut dyn Fragment).unwrap();
        assert_eq!(pin.note, "found");
    }

    #[test]
    fn find_injector_fails_when_the_chain_is_exhausted() {
        let err = find_injector::<dyn Fragment, _>(vec![None, None], "Pin", "somewhere")
            .unwrap_err();

        assert!(matches!(err, InjectError::NoInjectorSource { .. }));
        assert!(err.to_string().contains("No injector was found"));
        assert!(err.to_string().contains("somewhere"));
    }

    #[test]
    fn find_injector_stops_at_the_first_capability_even_when_it_returns_null() {
        let empty_shelf = Shelf { registry: None };
        let full_shelf = Shelf {
            registry: Some(pin_registry("unreachable")),
        };

        let err = find_injector(
            vec![
                Some(&empty_shelf as &dyn HasDispatchingInjector<dyn Fragment>),
                Some(&full_shelf as &dyn HasDispatchingInjector<dyn Fragment>),
            ],
            "Pin",
            "somewhere",
        )
        .unwrap_err();

        assert!(matches!(err, InjectError::ReturnedNullInjector { .. }));
        let message = err.to_string();
        assert!(message.contains("dispatching_injector() returned null"));
        assert!(message.contains("Shelf"));
    }
}
