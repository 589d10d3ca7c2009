//! Arena handle types
//!
//! Nodes and signals live in slot maps so that handles stay valid across
//! insertions and removals and a stale handle simply fails to resolve.

pub use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    /// Stable handle to a node in a [`SceneTree`](crate::scene::SceneTree)
    pub struct NodeId;

    /// Stable handle to a registered change signal
    pub struct SignalId;
}

/// Arena map keyed by [`NodeId`]
pub type NodeMap<T> = SlotMap<NodeId, T>;

/// Arena map keyed by [`SignalId`]
pub type SignalMap<T> = SlotMap<SignalId, T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_handle_does_not_resolve() {
        let mut map: NodeMap<&str> = NodeMap::with_key();
        let first = map.insert("first");
        map.remove(first);
        let second = map.insert("second");

        assert!(map.get(first).is_none());
        assert_eq!(map.get(second), Some(&"second"));
        assert_ne!(first, second);
    }
}
