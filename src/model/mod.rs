//! Data model for rooted phylogenetic trees.
//!
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex]. Children are stored as ordered index lists,
//! so multifurcating trees are supported.
//!
//! Leaf labels are not stored in the leaves themselves but in a shared
//! [LeafLabelMap]; leaves carry a [LabelIndex]. The alignment rows reference
//! taxa through the same map, which makes the tree/alignment name matching
//! and the per-leaf sequence lookup index-based.
//!
//! The topology is immutable once parsed. Per-site results (state vectors,
//! colours, decorated labels) never live in vertex fields; they are kept in
//! side tables parallel to the arena (see [crate::paint]), so colouring one
//! site cannot leak into another.

/// Taxon label mapping to compact indices
pub mod leaf_label_map;
/// Phylogenetic tree structure and traversal
pub mod tree;
/// Tree vertex types (root, internal, leaf)
pub mod vertex;

pub use leaf_label_map::LeafLabelMap;
pub use tree::{LabelIndex, Tree, VertexIndex};
pub use vertex::{BranchLength, Vertex};
