use num_traits::Float;

use crate::envelope::Envelope;
use crate::index::{Entry, Node, RTree, MAX_CHILDREN, MIN_CHILDREN};

impl<T> RTree<T>
where
    T: Float,
{
    /// Adds a record to the tree.
    ///
    /// Duplicates are permitted: several records may share an envelope, and
    /// the same record id may be stored more than once.
    pub fn insert(&mut self, envelope: Envelope<T>, record: usize) {
        let root = match self.root {
            Some(root) => root,
            None => {
                self.nodes.push(Node::new(true));
                let root = self.nodes.len() - 1;
                self.root = Some(root);
                root
            }
        };

        let level = self.node_depth(root) - 1;
        let leaf = self.choose_best_node(&envelope, level);

        self.append_record(leaf, envelope, record);
        self.adjust_envelopes_upwards(leaf, &envelope);

        if self.nodes[leaf].num_entries <= MAX_CHILDREN {
            return;
        }

        let sibling = self.split_node(leaf);
        let (node, sibling) = self.adjust_tree(leaf, Some(sibling));
        if let Some(sibling) = sibling {
            self.join_roots(node, sibling);
        }
    }

    /// Descends from the root to the node at the given level (the root being
    /// level zero) whose envelope needs the least enlargement to take in the
    /// given one, breaking ties by smaller area and then by first
    /// encountered.
    pub(super) fn choose_best_node(&self, envelope: &Envelope<T>, mut level: usize) -> usize {
        let mut node = self.root.expect("an empty tree has no node to choose");
        loop {
            if level == 0 {
                return node;
            }

            let entries = &self.nodes[node].entries[..self.nodes[node].num_entries];
            let mut best = 0;
            let mut best_delta = entries[0].envelope.enlargement(envelope);
            for (position, entry) in entries.iter().enumerate().skip(1) {
                let delta = entry.envelope.enlargement(envelope);
                if delta < best_delta
                    || (delta == best_delta
                        && entry.envelope.area() < entries[best].envelope.area())
                {
                    best = position;
                    best_delta = delta;
                }
            }

            node = entries[best].data;
            level -= 1;
        }
    }

    /// Expands the envelopes on the path from the given node up to the root
    /// so that they keep enclosing the given envelope.
    pub(super) fn adjust_envelopes_upwards(&mut self, mut node: usize, envelope: &Envelope<T>) {
        while Some(node) != self.root {
            let parent = self.nodes[node]
                .parent
                .expect("a non-root node has a parent");

            let entries = self.nodes[parent].num_entries;
            for entry in self.nodes[parent].entries[..entries].iter_mut() {
                if entry.data == node {
                    entry.envelope = entry.envelope.combine(envelope);
                }
            }

            node = parent;
        }
    }

    /// Walks from the given node to the root refreshing the envelope of the
    /// node on the way up, linking the freshly split sibling into each
    /// parent and splitting again whenever a parent overflows.
    ///
    /// Returns the last visited node together with the sibling that is still
    /// waiting to be linked, if any; such a sibling requires a new root.
    pub(super) fn adjust_tree(
        &mut self,
        mut node: usize,
        mut sibling: Option<usize>,
    ) -> (usize, Option<usize>) {
        loop {
            if Some(node) == self.root {
                return (node, sibling);
            }

            let parent = self.nodes[node]
                .parent
                .expect("a non-root node has a parent");

            let bound = self.nodes[node].bound();
            let entries = self.nodes[parent].num_entries;
            for entry in self.nodes[parent].entries[..entries].iter_mut() {
                if entry.data == node {
                    entry.envelope = bound;
                    break;
                }
            }

            let mut pending = None;
            if let Some(new) = sibling {
                let bound = self.nodes[new].bound();
                self.append_child(parent, bound, new);
                if self.nodes[parent].num_entries > MAX_CHILDREN {
                    pending = Some(self.split_node(parent));
                }
            }

            (node, sibling) = (parent, pending);
        }
    }

    /// Replaces the root with a fresh interior node holding the two given
    /// nodes.
    pub(super) fn join_roots(&mut self, left: usize, right: usize) {
        let mut root = Node::new(false);
        root.entries[0] = Entry {
            envelope: self.nodes[left].bound(),
            data: left,
        };
        root.entries[1] = Entry {
            envelope: self.nodes[right].bound(),
            data: right,
        };
        root.num_entries = 2;

        self.nodes.push(root);
        let root = self.nodes.len() - 1;
        self.nodes[left].parent = Some(root);
        self.nodes[right].parent = Some(root);
        self.root = Some(root);
    }

    /// Splits the overflowing node in two, keeping the entries selected by
    /// the best partition in place and moving the rest into a freshly
    /// allocated sibling. Returns the index of the sibling.
    ///
    /// Every partition leaving at least [`MIN_CHILDREN`] entries on each
    /// side is enumerated as a bit mask over the entry positions; the kept
    /// partition is the first one minimizing the summed area of the two
    /// group envelopes. Masks with the highest bit set would repeat an
    /// earlier partition with the groups swapped, so the enumeration stops
    /// short of them.
    pub(super) fn split_node(&mut self, node: usize) -> usize {
        let total = self.nodes[node].num_entries;

        let mut best_area = T::infinity();
        let mut best_mask = 0u32;
        for mask in 1u32..1 << (total - 1) {
            let ones = mask.count_ones() as usize;
            if ones < MIN_CHILDREN || total - ones < MIN_CHILDREN {
                continue;
            }

            let mut kept: Option<Envelope<T>> = None;
            let mut moved: Option<Envelope<T>> = None;
            for (position, entry) in self.nodes[node].entries[..total].iter().enumerate() {
                let group = if mask & (1 << position) == 0 {
                    &mut kept
                } else {
                    &mut moved
                };
                *group = Some(match group {
                    Some(bound) => bound.combine(&entry.envelope),
                    None => entry.envelope,
                });
            }

            let area = kept.expect("both split groups are populated").area()
                + moved.expect("both split groups are populated").area();
            if area < best_area {
                best_area = area;
                best_mask = mask;
            }
        }

        // Entries at a clear bit position stay; the rest move to the sibling.
        self.nodes.push(Node::new(self.nodes[node].is_leaf));
        let sibling = self.nodes.len() - 1;

        let entries = self.nodes[node].entries;
        self.nodes[node].num_entries = 0;
        for (position, entry) in entries[..total].iter().enumerate() {
            let target = if best_mask & (1 << position) == 0 {
                node
            } else {
                sibling
            };

            let target = &mut self.nodes[target];
            target.entries[target.num_entries] = *entry;
            target.num_entries += 1;
        }

        for slot in self.nodes[node].num_entries..total {
            self.nodes[node].entries[slot] = Entry::zero();
        }

        if !self.nodes[node].is_leaf {
            for position in 0..self.nodes[sibling].num_entries {
                let child = self.nodes[sibling].entries[position].data;
                self.nodes[child].parent = Some(sibling);
            }
        }

        sibling
    }
}
