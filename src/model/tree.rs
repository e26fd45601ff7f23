//! Tree module for phylogenetic tree representation.
//!
//! This module provides the core data structures for representing phylogenetic trees:
//! - `Tree`: The main tree structure using the arena pattern for efficient memory layout.
//! - `VertexIndex` is used to index vertices.
//! - `LabelIndex` is used to index labels.

use crate::model::vertex::{BranchLength, Vertex};

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

/// Index of a leaf label in a [LeafLabelMap](crate::model::leaf_label_map::LeafLabelMap).
pub type LabelIndex = usize;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by [VertexIndex].
/// Aim is to avoid referencing troubles as well as to provide efficient memory layout
/// and cache locality for traversal operations. The topology is read-only once built;
/// per-site results (colours, labels) live in side tables parallel to the arena,
/// never in vertex fields.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena
/// - Index of root is maintained
/// - No assumption on order of indices is maintained (e.g. leaves must not be first `n` indices)
/// - Internal vertices carry an ordered `Vec` of children (multifurcations allowed)
/// - Leaves contain a [LabelIndex] pointing into a shared
///   [LeafLabelMap](crate::model::leaf_label_map::LeafLabelMap)
/// - Branch lengths are optional, but if provided must be non-negative
///
/// # Construction
/// Add vertices one by one, bottom-up (children before their parent), then the root.
/// Test validity with [Tree::is_valid].
///
/// # Example
/// ```
/// use cladepaint::model::tree::Tree;
/// use cladepaint::model::leaf_label_map::LeafLabelMap;
/// use cladepaint::model::vertex::BranchLength;
///
/// // Create a tree: ((A:0.2,B:0.2):0.2,C:0.4);
/// let mut tree = Tree::new();
/// let mut labels = LeafLabelMap::new(3);
///
/// let index_a = tree.add_leaf(Some(BranchLength::new(0.2)), labels.get_or_insert("A"));
/// let index_b = tree.add_leaf(Some(BranchLength::new(0.2)), labels.get_or_insert("B"));
/// let index_c = tree.add_leaf(Some(BranchLength::new(0.4)), labels.get_or_insert("C"));
///
/// let index_internal = tree.add_internal_vertex(vec![index_a, index_b], Some(BranchLength::new(0.2)));
/// tree.add_root(vec![index_internal, index_c]);
///
/// assert!(tree.is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        Tree {
            root_index: NO_ROOT_SET_INDEX,
            vertices: Vec::new(),
        }
    }

    /// Creates a new tree with capacity for `num_leaves` leaves,
    /// assuming roughly one internal vertex per leaf.
    pub fn with_leaf_capacity(num_leaves: usize) -> Self {
        Tree {
            root_index: NO_ROOT_SET_INDEX,
            vertices: Vec::with_capacity(2 * num_leaves),
        }
    }

    /// Adds a root to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Indices of the child vertices, in tree order
    ///
    /// # Returns
    /// The index of the newly created root vertex.
    pub fn add_root(&mut self, children: Vec<VertexIndex>) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices.push(Vertex::new_root(index, children));
        self.root_index = index;

        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Indices of the child vertices, in tree order
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent (non-negative)
    ///
    /// # Returns
    /// The index of the newly created internal vertex.
    pub fn add_internal_vertex(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(index);
        }
        self.vertices
            .push(Vertex::new_internal(index, children, branch_length));

        index
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent (non-negative)
    /// * `label_index` - Index into the leaf label map for this leaf's name
    ///
    /// # Returns
    /// The index of the newly created leaf vertex.
    pub fn add_leaf(
        &mut self,
        branch_length: Option<BranchLength>,
        label_index: LabelIndex,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_leaf(index, branch_length, label_index));
        index
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and points to a Root vertex
    /// - All vertex indices match their position in the arena
    /// - There is only one root
    /// - Non-leaf vertices have at least one child
    /// - All child indices are valid and point back to correct parent
    /// - All parent indices are valid and include this vertex as a child
    /// - Root vertex has no parent set, all others have valid parent set
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        // Check root index is set and within bounds
        if self.root_index == NO_ROOT_SET_INDEX || self.root_index >= self.vertices.len() {
            return false;
        }

        // Check root is actually a Root variant
        if !self.vertices[self.root_index].is_root() {
            return false;
        }

        let mut found_root = false;

        // Validate each vertex
        for (index, vertex) in self.vertices.iter().enumerate() {
            // Check vertex index matches its arena position
            if vertex.index() != index {
                return false;
            }

            // Check that there is only one root
            if vertex.is_root() {
                if found_root {
                    return false;
                } else {
                    found_root = true;
                }
            }

            // Check children references
            if let Some(children) = vertex.children() {
                if children.is_empty() {
                    return false;
                }

                for &child in children {
                    // Check child index is in bounds
                    if child >= self.vertices.len() {
                        return false;
                    }

                    // Check child points back to this vertex as parent
                    if self.vertices[child].parent_index() != Some(index) {
                        return false;
                    }
                }
            }

            // Check parent references
            if vertex.is_root() {
                // Root should not have a parent set
                if vertex.has_parent() {
                    return false;
                }
            } else {
                // Non-root must have valid parent
                match vertex.parent_index() {
                    None => return false,
                    Some(parent_index) => {
                        // Check parent index is in bounds
                        if parent_index >= self.vertices.len() {
                            return false;
                        }

                        // Check parent includes this vertex in its children
                        match self.vertices[parent_index].children() {
                            Some(children) if children.contains(&index) => {}
                            _ => return false,
                        }
                    }
                }
            }
        }

        true
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root vertex.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of internal (non-root, non-leaf) vertices in this tree.
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Checks if all non-root vertices have branch lengths set.
    pub fn vertices_have_branch_lengths(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.is_root() || v.branch_length().is_some())
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children before visiting the vertex itself.
    /// This is what the ancestral colouring pass uses: state vectors of all children are
    /// available when their parent is visited. The iterator is stack-based, so traversal
    /// depth is bounded by heap, not the call stack, even for caterpillar trees.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Pre-order traversal visits each vertex before visiting its children;
    /// leaves appear in left-to-right tree order. Stack-based like
    /// [post_order_iter](Tree::post_order_iter).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns the leaf vertices in left-to-right tree order.
    pub fn leaves_in_order(&self) -> impl Iterator<Item = &Vertex> {
        self.pre_order_iter().filter(|v| v.is_leaf())
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                // Either we've already processed children, or this is a leaf
                return Some(vertex);
            } else {
                // Mark this vertex as "children will be visited"
                self.stack.push((index, true));

                // Push children in reverse, so the first child is processed first
                if let Some(children) = vertex.children() {
                    for &child in children.iter().rev() {
                        self.stack.push((child, false));
                    }
                }
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        // Push children in reverse, so the first child is processed first
        if let Some(children) = vertex.children() {
            for &child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(vertex)
    }
}
