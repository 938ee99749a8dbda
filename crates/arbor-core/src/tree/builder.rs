//! Construction of the multiplicative binomial short-rate tree.
//!
//! The tree is a full binary tree, not a recombining lattice: every node
//! gets its own up and down child, so level `k` holds `2^k` nodes. Nodes
//! are stored breadth first in a single arena, which puts level `k` in the
//! contiguous index range `[2^k - 1, 2^(k+1) - 1)`.
//!
//! ```text
//!                 r0                       level 0
//!              /      \
//!          r0*u        r0*d                level 1
//!         /    \      /    \
//!    r0*u*u r0*u*d r0*d*u r0*d*d           level 2
//! ```

use std::ops::Range;

use log::debug;

use super::node::{NodeId, RateNode};
use crate::error::{ArborError, ArborResult};

/// Deepest tree that can be built. Memory grows as `2^periods`.
pub const MAX_PERIODS: usize = 20;

/// A binomial short-rate tree.
///
/// Built by [`build_tree`]; the valuator annotates its nodes with bond
/// values.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTree {
    r0: f64,
    up: f64,
    down: f64,
    periods: usize,
    nodes: Vec<RateNode>,
}

impl RateTree {
    /// Index range of `level` within the arena.
    fn level_range(level: usize) -> Range<usize> {
        ((1 << level) - 1)..((1 << (level + 1)) - 1)
    }

    /// Initial short rate.
    #[must_use]
    pub fn r0(&self) -> f64 {
        self.r0
    }

    /// Up-move factor.
    #[must_use]
    pub fn up(&self) -> f64 {
        self.up
    }

    /// Down-move factor.
    #[must_use]
    pub fn down(&self) -> f64 {
        self.down
    }

    /// Number of periods, equal to the deepest level.
    #[must_use]
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Total number of nodes, `2^(periods + 1) - 1`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> &RateNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&RateNode> {
        self.nodes.get(id.index())
    }

    /// All nodes, breadth first.
    #[must_use]
    pub fn nodes(&self) -> &[RateNode] {
        &self.nodes
    }

    /// Nodes at `level`, from the all-up path to the all-down path.
    ///
    /// Empty for levels beyond [`periods`](Self::periods).
    #[must_use]
    pub fn level(&self, level: usize) -> &[RateNode] {
        if level > self.periods {
            return &[];
        }
        &self.nodes[Self::level_range(level)]
    }

    /// Ids of the nodes at `level`.
    pub fn level_ids(&self, level: usize) -> impl Iterator<Item = NodeId> {
        let range = if level > self.periods {
            0..0
        } else {
            Self::level_range(level)
        };
        range.map(NodeId::new)
    }

    /// Iterates over levels from the root down.
    pub fn levels(&self) -> impl Iterator<Item = &[RateNode]> + '_ {
        (0..=self.periods).map(move |level| self.level(level))
    }

    /// The up and down children of a node, `None` for leaves.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Option<(&RateNode, &RateNode)> {
        let node = self.node(id)?;
        let left = self.node(node.left()?)?;
        let right = self.node(node.right()?)?;
        Some((left, right))
    }

    /// The parent of a node, `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<&RateNode> {
        self.node(self.node(id)?.parent()?)
    }

    /// Ids from `id` back to the root, following parent links.
    #[must_use]
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.node(id).map(|_| id);
        while let Some(node_id) = current {
            path.push(node_id);
            current = self.nodes[node_id.index()].parent();
        }
        path
    }

    /// Returns true once a valuation has written the root value.
    #[must_use]
    pub fn is_valued(&self) -> bool {
        self.root().bond_value().is_some()
    }

    /// Bond values at `level`, or `None` if the level is not fully valued.
    #[must_use]
    pub fn values_at(&self, level: usize) -> Option<Vec<f64>> {
        self.level(level)
            .iter()
            .map(RateNode::bond_value)
            .collect::<Option<Vec<_>>>()
            .filter(|values| !values.is_empty())
    }

    /// Removes every bond value written by a previous valuation.
    pub fn clear_values(&mut self) {
        self.nodes.iter_mut().for_each(RateNode::clear_bond_value);
    }

    pub(crate) fn set_value(&mut self, id: NodeId, value: f64) {
        self.nodes[id.index()].set_bond_value(value);
    }
}

/// Builds a binomial short-rate tree.
///
/// # Arguments
///
/// * `r0` - Short rate at time 0
/// * `up` - Multiplicative up-move factor, strictly positive
/// * `down` - Multiplicative down-move factor, strictly positive
/// * `periods` - Number of periods; use the bond's period count
///
/// Factors are not required to satisfy `up > 1 > down`.
///
/// # Errors
///
/// Returns a configuration error for negative `periods`, periods above
/// [`MAX_PERIODS`], non-positive or non-finite factors, or a non-finite `r0`.
///
/// # Example
///
/// ```
/// use arbor_core::tree::build_tree;
///
/// let tree = build_tree(0.05, 1.05, 0.95, 4).unwrap();
/// assert_eq!(tree.periods(), 4);
/// assert_eq!(tree.level(4).len(), 16);
/// ```
pub fn build_tree(r0: f64, up: f64, down: f64, periods: i64) -> ArborResult<RateTree> {
    if periods < 0 {
        return Err(ArborError::invalid_tree(format!(
            "periods must be non-negative, got {periods}"
        )));
    }
    let periods = usize::try_from(periods)
        .map_err(|_| ArborError::invalid_tree(format!("periods {periods} out of range")))?;
    if periods > MAX_PERIODS {
        return Err(ArborError::TooManyPeriods {
            requested: periods,
            max: MAX_PERIODS,
        });
    }
    if !r0.is_finite() {
        return Err(ArborError::invalid_tree(format!(
            "initial rate must be finite, got {r0}"
        )));
    }
    for (name, factor) in [("up", up), ("down", down)] {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ArborError::invalid_tree(format!(
                "{name} factor must be strictly positive, got {factor}"
            )));
        }
    }

    let capacity = (1usize << (periods + 1)) - 1;
    let mut nodes = Vec::with_capacity(capacity);
    nodes.push(RateNode::new(r0, 0, None));

    for level in 1..=periods {
        for parent_index in RateTree::level_range(level - 1) {
            let rate = nodes[parent_index].rate();
            let parent = NodeId::new(parent_index);

            let left = NodeId::new(nodes.len());
            nodes.push(RateNode::new(rate * up, level, Some(parent)));
            let right = NodeId::new(nodes.len());
            nodes.push(RateNode::new(rate * down, level, Some(parent)));

            nodes[parent_index].set_children(left, right);
        }
    }

    debug!(
        "built rate tree: r0={}, up={}, down={}, periods={}, nodes={}",
        r0,
        up,
        down,
        periods,
        nodes.len()
    );

    Ok(RateTree {
        r0,
        up,
        down,
        periods,
        nodes,
    })
}
