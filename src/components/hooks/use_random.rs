use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

// Ends up inside CSS selectors built by the select script, so no "/" or "-".
const PREFIX: &str = "nav_ui";

static COUNTER: AtomicUsize = AtomicUsize::new(1);

/// DOM id unique within the page, e.g. `select_nav_ui_1234`.
pub fn use_random_id_for(element: &str) -> String {
    let mut hasher = DefaultHasher::new();
    COUNTER.fetch_add(1, Ordering::SeqCst).hash(&mut hasher);
    format!("{element}_{PREFIX}_{}", hasher.finish())
}
