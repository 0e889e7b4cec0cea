use num_traits::Float;

use crate::envelope::Envelope;
use crate::index::{Entry, RTree, MAX_CHILDREN, MIN_CHILDREN};

impl<T> RTree<T>
where
    T: Float,
{
    /// Removes a single record with a matching id, returning whether one was
    /// found.
    ///
    /// The envelope restricts where to look: a record is only found when its
    /// stored envelope overlaps the given one. When several entries match,
    /// exactly one is removed per call.
    pub fn delete(&mut self, envelope: Envelope<T>, record: usize) -> bool {
        let Some(root) = self.root else {
            return false;
        };

        let Some((node, position)) = self.find_record(root, &envelope, record) else {
            return false;
        };

        self.remove_entry(node, position);
        self.condense_tree(node);

        // A root left with a single child no longer separates anything.
        if let Some(root) = self.root {
            if !self.nodes[root].is_leaf && self.nodes[root].num_entries == 1 {
                let promoted = self.nodes[root].entries[0].data;
                self.nodes[promoted].parent = None;
                self.root = Some(promoted);
            }
        }

        true
    }

    /// Returns the leaf node and entry position of the first record with the
    /// given id found among the nodes overlapping the envelope.
    fn find_record(
        &self,
        node: usize,
        envelope: &Envelope<T>,
        record: usize,
    ) -> Option<(usize, usize)> {
        let current = &self.nodes[node];
        for (position, entry) in current.entries[..current.num_entries].iter().enumerate() {
            if !entry.envelope.overlaps(envelope) {
                continue;
            }

            if current.is_leaf {
                if entry.data == record {
                    return Some((node, position));
                }
            } else if let Some(found) = self.find_record(entry.data, envelope, record) {
                return Some(found);
            }
        }

        None
    }

    /// Swap-removes the entry at the given position, blanking the freed
    /// slot.
    fn remove_entry(&mut self, node: usize, position: usize) {
        let node = &mut self.nodes[node];
        node.num_entries -= 1;
        node.entries[position] = node.entries[node.num_entries];
        node.entries[node.num_entries] = Entry::zero();
    }

    /// Walks from the given node to the root, unlinking under-full nodes on
    /// the way and refreshing the envelopes of the remaining ones. The
    /// records and subtrees hanging off the unlinked nodes are re-inserted
    /// once the walk is over.
    fn condense_tree(&mut self, mut node: usize) {
        let mut eliminated = Vec::new();

        while Some(node) != self.root {
            let parent = self.nodes[node]
                .parent
                .expect("a non-root node has a parent");

            let position = self.nodes[parent].entries[..self.nodes[parent].num_entries]
                .iter()
                .position(|entry| entry.data == node)
                .expect("a parent holds an entry for each of its children");

            if self.nodes[node].num_entries < MIN_CHILDREN {
                eliminated.push(node);
                self.remove_entry(parent, position);
            } else {
                self.nodes[parent].entries[position].envelope = self.nodes[node].bound();
            }

            node = parent;
        }

        for orphan in eliminated {
            if self.nodes[orphan].is_leaf {
                for position in 0..self.nodes[orphan].num_entries {
                    let Entry { envelope, data } = self.nodes[orphan].entries[position];
                    self.insert(envelope, data);
                }
            } else {
                for position in 0..self.nodes[orphan].num_entries {
                    let child = self.nodes[orphan].entries[position].data;
                    self.reinsert_node(child);
                }
            }
        }
    }

    /// Hooks a subtree that fell off during condensing back into the tree,
    /// at the level matching the height of the subtree.
    fn reinsert_node(&mut self, node: usize) {
        let envelope = self.nodes[node].bound();
        let root = self.root.expect("re-insertion requires a rooted tree");
        let level = self.node_depth(root) - self.node_depth(node) - 1;
        let target = self.choose_best_node(&envelope, level);

        self.append_child(target, envelope, node);
        self.adjust_envelopes_upwards(node, &envelope);

        if self.nodes[target].num_entries <= MAX_CHILDREN {
            return;
        }

        let sibling = self.split_node(target);
        let (node, sibling) = self.adjust_tree(target, Some(sibling));
        if let Some(sibling) = sibling {
            self.join_roots(node, sibling);
        }
    }
}
