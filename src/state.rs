use crate::store::ListStore;

/// Shared, read-only per-process state handed to every request.
pub struct AppState {
    pub store: Box<dyn ListStore>,
}

impl AppState {
    pub fn new(store: impl ListStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn store(&self) -> &dyn ListStore {
        self.store.as_ref()
    }
}
