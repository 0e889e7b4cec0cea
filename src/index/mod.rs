mod bulk;
mod delete;
mod insert;
mod nearest;

use std::convert::Infallible;

use num_traits::Float;

use crate::{envelope::Envelope, point::Point};

/// The least amount of entries a non-root node may hold.
const MIN_CHILDREN: usize = 2;
/// The most entries any node may hold.
const MAX_CHILDREN: usize = 4;

/// A record or child reference held by a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry<T> {
    /// The envelope bounding the referenced content.
    envelope: Envelope<T>,
    /// The record id when the holding node is a leaf, the index of the child
    /// node otherwise.
    data: usize,
}

impl<T> Entry<T>
where
    T: Float,
{
    /// Returns the zero entry used to blank unused slots.
    fn zero() -> Self {
        let origin = Point {
            x: T::zero(),
            y: T::zero(),
        };

        Self {
            envelope: origin.into(),
            data: 0,
        }
    }
}

/// A fixed-capacity node of an [`RTree`].
///
/// The entry array holds one slot more than the allowed maximum so that an
/// overflowing entry can sit in place until the node is split. Slots at and
/// past num_entries always hold the zero entry.
#[derive(Debug, Clone)]
struct Node<T> {
    entries: [Entry<T>; MAX_CHILDREN + 1],
    num_entries: usize,
    parent: Option<usize>,
    is_leaf: bool,
}

impl<T> Node<T>
where
    T: Float,
{
    fn new(is_leaf: bool) -> Self {
        Self {
            entries: [Entry::zero(); MAX_CHILDREN + 1],
            num_entries: 0,
            parent: None,
            is_leaf,
        }
    }

    /// Returns the smallest envelope enclosing every entry of the node.
    fn bound(&self) -> Envelope<T> {
        self.entries[1..self.num_entries]
            .iter()
            .fold(self.entries[0].envelope, |bound, entry| {
                bound.combine(&entry.envelope)
            })
    }
}

/// The verdict of a search callback over a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit<E = Infallible> {
    /// Keep searching.
    Continue,
    /// Terminate the search reporting success.
    Stop,
    /// Terminate the search reporting the given error.
    Abort(E),
}

impl<E> Visit<E> {
    /// Returns true if, and only if, the search must keep going.
    fn is_continue(&self) -> bool {
        matches!(self, Self::Continue)
    }

    /// Folds the verdict into the result reported by a whole search.
    fn into_result(self) -> Result<(), E> {
        match self {
            Visit::Abort(error) => Err(error),
            _ => Ok(()),
        }
    }
}

/// An in-memory R-tree holding envelope and record id pairs.
///
/// Records themselves are not stored in the tree: callers keep their own
/// record storage and identify entries by opaque ids. Nodes live in a flat
/// arena linked by index; slots vacated by deletions are left unused so that
/// indices stay stable.
#[derive(Debug, Clone)]
pub struct RTree<T = f64> {
    nodes: Vec<Node<T>>,
    root: Option<usize>,
}

impl<T> Default for RTree<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }
}

impl<T> RTree<T>
where
    T: Float,
{
    /// Returns a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls visit with the record id of every entry whose envelope overlaps
    /// the given one, in no particular order.
    ///
    /// Returning [`Visit::Stop`] from the callback terminates the search
    /// reporting success, while [`Visit::Abort`] terminates it surfacing the
    /// carried error.
    pub fn range_search<E>(
        &self,
        query: Envelope<T>,
        mut visit: impl FnMut(usize) -> Visit<E>,
    ) -> Result<(), E> {
        let Some(root) = self.root else {
            return Ok(());
        };

        self.range_search_in(root, &query, &mut visit).into_result()
    }

    fn range_search_in<E>(
        &self,
        node: usize,
        query: &Envelope<T>,
        visit: &mut impl FnMut(usize) -> Visit<E>,
    ) -> Visit<E> {
        let current = &self.nodes[node];
        for entry in &current.entries[..current.num_entries] {
            if !entry.envelope.overlaps(query) {
                continue;
            }

            let verdict = if current.is_leaf {
                visit(entry.data)
            } else {
                self.range_search_in(entry.data, query, visit)
            };

            if !verdict.is_continue() {
                return verdict;
            }
        }

        Visit::Continue
    }

    /// Returns the envelope bounding every record in the tree, or `None`
    /// when the tree holds no record.
    pub fn extent(&self) -> Option<Envelope<T>> {
        let root = &self.nodes[self.root?];
        (root.num_entries > 0).then(|| root.bound())
    }

    /// Returns the number of node layers in the subtree rooted at the given
    /// node.
    fn node_depth(&self, mut node: usize) -> usize {
        let mut depth = 1;
        while !self.nodes[node].is_leaf {
            depth += 1;
            node = self.nodes[node].entries[0].data;
        }
        depth
    }

    /// Appends an entry to the given node, which must not be full.
    fn append_record(&mut self, node: usize, envelope: Envelope<T>, record: usize) {
        let node = &mut self.nodes[node];
        node.entries[node.num_entries] = Entry {
            envelope,
            data: record,
        };
        node.num_entries += 1;
    }

    /// Appends a child entry to the given node, linking the child back to
    /// its new parent.
    fn append_child(&mut self, node: usize, envelope: Envelope<T>, child: usize) {
        self.append_record(node, envelope, child);
        self.nodes[child].parent = Some(node);
    }
}

#[cfg(test)]
impl<T> RTree<T>
where
    T: Float + std::fmt::Debug,
{
    /// Asserts every structural invariant documented on the tree, and that
    /// the reachable records are exactly the given ones, counting
    /// multiplicity of duplicated ids.
    pub(crate) fn check_invariants(&self, records: &[(Envelope<T>, usize)]) {
        let Some(root) = self.root else {
            assert!(records.is_empty(), "an empty tree must hold no records");
            return;
        };

        assert_eq!(self.nodes[root].parent, None, "the root has no parent");
        if self.nodes[root].num_entries == 0 {
            assert!(records.is_empty(), "an empty root must hold no records");
        }

        let mut pending = std::collections::HashMap::new();
        for &(_, record) in records {
            *pending.entry(record).or_insert(0usize) += 1;
        }

        let mut leaf_depth = None;
        self.check_node(root, 0, &mut leaf_depth, &mut pending);
        assert!(
            pending.is_empty(),
            "records missing from the tree: {pending:?}"
        );

        let extent = records
            .iter()
            .map(|(envelope, _)| *envelope)
            .reduce(|extent, envelope| extent.combine(&envelope));
        assert_eq!(self.extent(), extent, "extent must bound every record");
    }

    fn check_node(
        &self,
        node: usize,
        depth: usize,
        leaf_depth: &mut Option<usize>,
        pending: &mut std::collections::HashMap<usize, usize>,
    ) {
        let current = &self.nodes[node];

        if Some(node) == self.root {
            assert!(
                current.num_entries <= MAX_CHILDREN,
                "the root holds {} entries",
                current.num_entries,
            );
        } else {
            assert!(
                (MIN_CHILDREN..=MAX_CHILDREN).contains(&current.num_entries),
                "node {node} holds {} entries",
                current.num_entries,
            );
        }

        for slot in current.num_entries..current.entries.len() {
            assert_eq!(
                current.entries[slot],
                Entry::zero(),
                "slot {slot} of node {node} is not blank",
            );
        }

        if current.is_leaf {
            assert_eq!(
                *leaf_depth.get_or_insert(depth),
                depth,
                "leaves lie at distinct depths",
            );

            for entry in &current.entries[..current.num_entries] {
                let count = pending
                    .get_mut(&entry.data)
                    .unwrap_or_else(|| panic!("unexpected record {} in node {node}", entry.data));
                *count -= 1;
                if *count == 0 {
                    pending.remove(&entry.data);
                }
            }
        } else {
            assert!(current.num_entries > 0, "interior node {node} is empty");

            for entry in &current.entries[..current.num_entries] {
                let child = &self.nodes[entry.data];
                assert_eq!(
                    child.parent,
                    Some(node),
                    "child {} disagrees on its parent",
                    entry.data,
                );
                assert_eq!(
                    entry.envelope,
                    child.bound(),
                    "the entry for child {} is not its exact bound",
                    entry.data,
                );

                self.check_node(entry.data, depth + 1, leaf_depth, pending);
            }
        }
    }
}
