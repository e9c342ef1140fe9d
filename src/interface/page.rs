use std::{
    collections::HashMap,
    sync::Mutex,
};

/// Named mutable regions of the presentation layer.
///
/// Lookup follows element-by-id semantics: `replace` and `append` only touch
/// a region that already exists and report whether the id resolved. The
/// store is shared between concurrent invocations without coordination, so
/// appends from overlapping calls interleave in completion order.
pub trait Page: Send + Sync {
    fn read(&self, id: &str) -> Option<String>;
    fn replace(&self, id: &str, content: &str) -> bool;
    fn append(&self, id: &str, content: &str) -> bool;
}

/// In-process region store, for hosts without a real presentation layer and
/// for tests. Regions must be defined before a binding can render into them.
#[derive(Debug, Default)]
pub struct InMemoryPage {
    regions: Mutex<HashMap<String, String>>,
}

impl InMemoryPage {
    pub fn new() -> Self {
        Default::default()
    }

    /// Create (or reset) a region.
    pub fn define(&self, id: impl ToString, content: impl ToString) {
        self.lock().insert(id.to_string(), content.to_string());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.regions.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<R: ToString, L: ToString> FromIterator<(R, L)> for InMemoryPage {
    fn from_iter<I: IntoIterator<Item = (R, L)>>(iter: I) -> Self {
        let regions = iter.into_iter().map(|(id, content)| (id.to_string(), content.to_string())).collect();
        Self { regions: Mutex::new(regions) }
    }
}

impl Page for InMemoryPage {
    fn read(&self, id: &str) -> Option<String> {
        self.lock().get(id).cloned()
    }

    fn replace(&self, id: &str, content: &str) -> bool {
        match self.lock().get_mut(id) {
            Some(region) => {
                *region = content.to_string();
                true
            }
            None => false,
        }
    }

    fn append(&self, id: &str, content: &str) -> bool {
        match self.lock().get_mut(id) {
            Some(region) => {
                region.push_str(content);
                true
            }
            None => false,
        }
    }
}
