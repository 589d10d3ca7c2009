//! Change signals
//!
//! A signal watches a value and runs its callback on the first poll after
//! the value changes. Signals live in a [`SignalRegistry`] that the UI
//! manager polls once per frame, before picking. They stay connected until
//! explicitly disconnected.

use crate::foundation::collections::{NodeId, SignalId, SignalMap};
use crate::scene::{SceneTree, Value};

/// Something the registry polls each frame
pub trait Signal {
    /// Compare against the last snapshot and fire on change
    fn poll(&mut self, tree: &mut SceneTree);
}

/// Signal bound to a value-holder node
pub struct ValueSignal {
    node: NodeId,
    last: Option<Value>,
    stale: bool,
    callback: Box<dyn FnMut(&mut SceneTree)>,
}

impl ValueSignal {
    /// Bind to `node`, snapshotting its current value
    pub fn new(tree: &SceneTree, node: NodeId, callback: impl FnMut(&mut SceneTree) + 'static) -> Self {
        Self {
            node,
            last: tree.get(node).and_then(|n| n.value()).cloned(),
            stale: false,
            callback: Box::new(callback),
        }
    }
}

impl Signal for ValueSignal {
    fn poll(&mut self, tree: &mut SceneTree) {
        let Some(current) = tree.get(self.node).and_then(|node| node.value()).cloned() else {
            // The node was deleted without disconnecting first.
            if !self.stale {
                log::warn!("Signal bound to {:?} outlived its value", self.node);
                self.stale = true;
            }
            return;
        };
        if self.last.as_ref() != Some(&current) {
            self.last = Some(current);
            (self.callback)(tree);
        }
    }
}

/// Signal bound to a getter over the tree
pub struct GetterSignal<T> {
    getter: Box<dyn Fn(&SceneTree) -> T>,
    last: T,
    callback: Box<dyn FnMut(&mut SceneTree)>,
}

impl<T: PartialEq> GetterSignal<T> {
    /// Bind to `getter`, snapshotting its current result
    pub fn new(
        tree: &SceneTree,
        getter: impl Fn(&SceneTree) -> T + 'static,
        callback: impl FnMut(&mut SceneTree) + 'static,
    ) -> Self {
        Self {
            last: getter(tree),
            getter: Box::new(getter),
            callback: Box::new(callback),
        }
    }
}

impl<T: PartialEq> Signal for GetterSignal<T> {
    fn poll(&mut self, tree: &mut SceneTree) {
        let current = (self.getter)(tree);
        if current != self.last {
            self.last = current;
            (self.callback)(tree);
        }
    }
}

/// Registry of live signals
#[derive(Default)]
pub struct SignalRegistry {
    signals: SignalMap<Box<dyn Signal>>,
}

impl SignalRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register any signal
    pub fn connect(&mut self, signal: impl Signal + 'static) -> SignalId {
        self.signals.insert(Box::new(signal))
    }

    /// Watch the value held by `node`
    pub fn connect_value(
        &mut self,
        tree: &SceneTree,
        node: NodeId,
        callback: impl FnMut(&mut SceneTree) + 'static,
    ) -> SignalId {
        self.connect(ValueSignal::new(tree, node, callback))
    }

    /// Watch the result of `getter`
    pub fn connect_getter<T: PartialEq + 'static>(
        &mut self,
        tree: &SceneTree,
        getter: impl Fn(&SceneTree) -> T + 'static,
        callback: impl FnMut(&mut SceneTree) + 'static,
    ) -> SignalId {
        self.connect(GetterSignal::new(tree, getter, callback))
    }

    /// Remove a signal; returns false if it was already gone
    pub fn disconnect(&mut self, id: SignalId) -> bool {
        self.signals.remove(id).is_some()
    }

    /// Whether `id` is still connected
    pub fn is_connected(&self, id: SignalId) -> bool {
        self.signals.contains_key(id)
    }

    /// Poll every signal once
    pub fn poll(&mut self, tree: &mut SceneTree) {
        for signal in self.signals.values_mut() {
            signal.poll(tree);
        }
    }

    /// Number of connected signals
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    /// Whether no signal is connected
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Disconnect everything
    pub fn clear(&mut self) {
        self.signals.clear();
    }
}

impl std::fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalRegistry").field("signals", &self.signals.len()).finish()
    }
}
