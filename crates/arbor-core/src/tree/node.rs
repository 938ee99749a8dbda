//! Nodes of the short-rate tree.

use std::fmt;

use serde::Serialize;

/// Index of a node inside a [`RateTree`](super::RateTree) arena.
///
/// Ids are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Short rate over one period at one point of the tree.
///
/// `left` is the up move, `right` the down move. `parent` is a back
/// reference for navigation only; the arena owns every node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateNode {
    rate: f64,
    level: usize,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    bond_value: Option<f64>,
}

impl RateNode {
    pub(crate) fn new(rate: f64, level: usize, parent: Option<NodeId>) -> Self {
        Self {
            rate,
            level,
            parent,
            left: None,
            right: None,
            bond_value: None,
        }
    }

    pub(crate) fn set_children(&mut self, left: NodeId, right: NodeId) {
        self.left = Some(left);
        self.right = Some(right);
    }

    pub(crate) fn set_bond_value(&mut self, value: f64) {
        debug_assert!(
            self.bond_value.is_none(),
            "bond value written twice at level {}",
            self.level
        );
        self.bond_value = Some(value);
    }

    pub(crate) fn clear_bond_value(&mut self) {
        self.bond_value = None;
    }

    /// Short rate for the period starting at this node.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Period index from the root (root = 0).
    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    /// The node one period earlier, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Successor after an up move.
    #[must_use]
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Successor after a down move.
    #[must_use]
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Bond value written by the last valuation, if any.
    #[must_use]
    pub fn bond_value(&self) -> Option<f64> {
        self.bond_value
    }

    /// Returns true for nodes on the final level.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns true for the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node() {
        let node = RateNode::new(0.05, 0, None);
        assert_eq!(node.rate(), 0.05);
        assert_eq!(node.level(), 0);
        assert!(node.is_root());
        assert!(node.is_leaf());
        assert!(node.bond_value().is_none());
    }

    #[test]
    fn test_children_and_value() {
        let mut node = RateNode::new(0.05, 1, Some(NodeId::ROOT));
        node.set_children(NodeId::new(3), NodeId::new(4));
        assert!(!node.is_leaf());
        assert!(!node.is_root());
        assert_eq!(node.left(), Some(NodeId::new(3)));
        assert_eq!(node.right(), Some(NodeId::new(4)));

        node.set_bond_value(101.5);
        assert_eq!(node.bond_value(), Some(101.5));
        node.clear_bond_value();
        assert!(node.bond_value().is_none());
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId::new(7).to_string(), "#7");
        assert_eq!(NodeId::ROOT.index(), 0);
    }
}
