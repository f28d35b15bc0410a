use std::sync::Arc;

use dirk::prelude::*;

struct DemoApp {
    fragments: DispatchingInjector<dyn Fragment>,
}

impl DemoApp {
    fn new() -> Self {
        let fragments = DispatchingInjector::builder()
            .bind(ClosureFactory::new(|pane: &mut SettingsPane| {
                pane.title = "configured by the application".to_owned();
            }))
            .build()
            .expect("a single binding cannot collide");
        Self { fragments }
    }
}

impl Application for DemoApp {
    fn fragment_injector_source(&self) -> Option<&dyn HasDispatchingInjector<dyn Fragment>> {
        Some(self)
    }
}

impl HasDispatchingInjector<dyn Fragment> for DemoApp {
    fn dispatching_injector(&self) -> Option<&DispatchingInjector<dyn Fragment>> {
        Some(&self.fragments)
    }
}

struct DemoActivity {
    app: Arc<dyn Application>,
}

impl Activity for DemoActivity {
    fn application(&self) -> Arc<dyn Application> {
        Arc::clone(&self.app)
    }
}

#[derive(Default)]
struct SettingsPane {
    title: String,
    activity: Option<Arc<dyn Activity>>,
}

impl Fragment for SettingsPane {
    fn parent_fragment(&self) -> Option<Arc<dyn Fragment>> {
        None
    }

    fn activity(&self) -> Option<Arc<dyn Activity>> {
        self.activity.clone()
    }
}

fn main() {
    let app: Arc<dyn Application> = Arc::new(DemoApp::new());
    let activity: Arc<dyn Activity> = Arc::new(DemoActivity { app });
    let mut pane = SettingsPane {
        activity: Some(activity),
        ..Default::default()
    };

    inject_fragment(Some(&mut pane as &mut dyn Fragment))
        .expect("the demo application provides a fragment injector");
    println!("settings pane says: {}", pane.title);
}
