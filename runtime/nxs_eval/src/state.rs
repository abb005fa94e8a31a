//! The global state store and watcher registry.
//!
//! Every variable declaration and assignment the evaluator executes is
//! mirrored into this store, so the materializer can read current values
//! without scope context. Watchers subscribe to individual keys and fire
//! synchronously, in registration order, whenever an assignment mutates
//! that key.

use crate::value::Value;
use rustc_hash::FxHashMap;

/// Identifies a registered watcher so it can be removed later.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WatcherId(u64);

type WatcherFn = Box<dyn FnMut(&Value)>;

struct Watcher {
    id: WatcherId,
    callback: WatcherFn,
}

/// Process-wide name→value store plus the watcher registry.
///
/// One store exists per runtime instance; nested imports build their own.
#[derive(Default)]
pub struct StateStore {
    values: FxHashMap<String, Value>,
    watchers: FxHashMap<String, Vec<Watcher>>,
    next_watcher: u64,
}

impl StateStore {
    pub fn new() -> Self {
        StateStore::default()
    }

    /// Current value for `key`, or null when absent.
    pub fn get(&self, key: &str) -> Value {
        self.values.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Returns `true` if `key` has ever been written.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Write `key` without notifying watchers. Used by declarations.
    pub fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    /// Write `key` and notify its watchers, in registration order, with
    /// the new value. Used by assignments and by input listeners.
    pub fn assign(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value.clone());
        if let Some(list) = self.watchers.get_mut(key) {
            for watcher in list.iter_mut() {
                (watcher.callback)(&value);
            }
        }
    }

    /// Register a watcher for `key`.
    pub fn watch(&mut self, key: &str, callback: impl FnMut(&Value) + 'static) -> WatcherId {
        let id = WatcherId(self.next_watcher);
        self.next_watcher += 1;
        self.watchers.entry(key.to_string()).or_default().push(Watcher {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a previously registered watcher. Unknown ids are ignored.
    pub fn unwatch(&mut self, id: WatcherId) {
        for list in self.watchers.values_mut() {
            list.retain(|w| w.id != id);
        }
    }

    /// A value snapshot of the store, for debug surfaces and tests.
    pub fn snapshot(&self) -> FxHashMap<String, Value> {
        self.values.clone()
    }
}
