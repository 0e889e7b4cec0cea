use std::cmp::Ordering;

use num_traits::Float;

use crate::envelope::Envelope;
use crate::index::{Entry, Node, RTree, MAX_CHILDREN};

impl<T> RTree<T>
where
    T: Float,
{
    /// Builds a tree holding the given records in a single offline pass.
    ///
    /// Records are ordered by envelope center and packed into evenly filled
    /// leaves; each resulting level of nodes is then packed the same way
    /// until a single node remains. The outcome satisfies the same
    /// invariants as a tree built by repeated insertion, although the node
    /// layout may differ.
    pub fn bulk_load(items: Vec<(Envelope<T>, usize)>) -> Self {
        let mut tree = Self::new();
        if items.is_empty() {
            return tree;
        }

        let mut entries: Vec<Entry<T>> = items
            .into_iter()
            .map(|(envelope, data)| Entry { envelope, data })
            .collect();

        entries.sort_unstable_by(|a, b| {
            let center = |envelope: &Envelope<T>| {
                (envelope.min.x + envelope.max.x, envelope.min.y + envelope.max.y)
            };

            center(&a.envelope)
                .partial_cmp(&center(&b.envelope))
                .unwrap_or(Ordering::Equal)
        });

        let mut level = tree.pack_level(&entries, true);
        while level.len() > 1 {
            let entries: Vec<Entry<T>> = level
                .iter()
                .map(|&node| Entry {
                    envelope: tree.nodes[node].bound(),
                    data: node,
                })
                .collect();

            level = tree.pack_level(&entries, false);
        }

        tree.root = level.first().copied();
        tree
    }

    /// Packs the given entries into freshly allocated nodes of one level,
    /// returning their indices in packing order.
    ///
    /// Entries are spread as evenly as possible over the fewest nodes able
    /// to hold them, so that no node falls under the minimum fill.
    fn pack_level(&mut self, entries: &[Entry<T>], is_leaf: bool) -> Vec<usize> {
        let groups = entries.len().div_ceil(MAX_CHILDREN);
        let base = entries.len() / groups;
        let mut extra = entries.len() % groups;

        let mut level = Vec::with_capacity(groups);
        let mut start = 0;
        for _ in 0..groups {
            let size = base + usize::from(extra > 0);
            extra = extra.saturating_sub(1);

            let mut node = Node::new(is_leaf);
            node.entries[..size].copy_from_slice(&entries[start..start + size]);
            node.num_entries = size;
            self.nodes.push(node);

            let index = self.nodes.len() - 1;
            if !is_leaf {
                for position in 0..size {
                    let child = self.nodes[index].entries[position].data;
                    self.nodes[child].parent = Some(index);
                }
            }

            level.push(index);
            start += size;
        }

        level
    }
}
