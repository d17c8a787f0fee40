// Example: adapter-driven session with a synchronous fake sentinel.
use std::sync::{Arc, Mutex};

use cardlist::{ListingError, ListingOptions, VisibilityCallback, VisibilitySource, VisibilitySubscription};
use cardlist_adapter::Controller;

/// Fires its callbacks whenever `fire` is called; a real embedding would
/// wrap an intersection observer here.
#[derive(Clone, Default)]
struct Sentinel {
    subscribers: Arc<Mutex<Vec<VisibilityCallback>>>,
}

impl Sentinel {
    fn fire(&self) {
        for cb in self.subscribers.lock().unwrap().iter() {
            cb();
        }
    }
}

impl VisibilitySource for Sentinel {
    fn subscribe(&self, on_visible: VisibilityCallback) -> VisibilitySubscription {
        self.subscribers.lock().unwrap().push(on_visible);
        let subscribers = Arc::clone(&self.subscribers);
        VisibilitySubscription::new(move || subscribers.lock().unwrap().clear())
    }
}

fn main() -> Result<(), ListingError> {
    let sentinel = Sentinel::default();
    let mut controller = Controller::new(ListingOptions::new().with_rng_seed(7));
    controller.attach(&sentinel);

    let mut now = 1_700_000_000_000u64;
    while controller.listing().has_more() {
        // The end-of-list marker stays "visible" in this headless run.
        sentinel.fire();
        controller.tick(now)?;
        now += controller.listing().options().fetch_delay_ms;
        if controller.tick(now)? {
            println!(
                "page {:>2} -> {:>3} cards",
                controller.listing().page() - 1,
                controller.listing().cards().len()
            );
        }
    }
    println!("exhausted after {} cards", controller.listing().cards().len());
    Ok(())
}
