// View registry - Rendered pages and their chart state, oldest evicted first
use crate::application::heating_service::HeatingView;
use std::collections::BTreeMap;

pub type ViewId = u64;

pub const DEFAULT_MAX_VIEWS: usize = 64;

/// Views keyed by a monotonic id, so the smallest key is the oldest view.
pub struct ViewRegistry {
    views: BTreeMap<ViewId, HeatingView>,
    next_id: ViewId,
    capacity: usize,
}

impl ViewRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            views: BTreeMap::new(),
            next_id: 1,
            capacity: capacity.max(1),
        }
    }

    /// Register a freshly rendered view, evicting the oldest ones over capacity.
    pub fn insert(&mut self, view: HeatingView) -> (ViewId, &HeatingView) {
        let id = self.next_id;
        self.next_id += 1;

        while self.views.len() >= self.capacity {
            if let Some((evicted, _)) = self.views.pop_first() {
                tracing::debug!(view = evicted, "evicted heating view");
            }
        }

        let view: &HeatingView = self.views.entry(id).or_insert(view);
        (id, view)
    }

    pub fn get(&self, id: ViewId) -> Option<&HeatingView> {
        self.views.get(&id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut HeatingView> {
        self.views.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_VIEWS)
    }
}
