use std::cmp::Ordering;
use std::collections::BinaryHeap;

use num_traits::Float;

use crate::envelope::Envelope;
use crate::index::{RTree, Visit};

/// A queued entry tagged with whether its data leads to a child node.
///
/// The distance to the search origin is fixed when the entry is queued and
/// never recomputed.
struct Queued<T> {
    distance: T,
    data: usize,
    has_child: bool,
}

impl<T> PartialEq for Queued<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl<T> Eq for Queued<T> where T: PartialEq {}

impl<T> PartialOrd for Queued<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Queued<T>
where
    T: PartialOrd,
{
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so that the standard max-heap pops the closest entry
        // first. Distances are never NaN: the incomparable case is
        // unreachable.
        other
            .distance
            .partial_cmp(&self.distance)
            .unwrap_or(Ordering::Equal)
    }
}

impl<T> RTree<T>
where
    T: Float,
{
    /// Calls visit with every record id in non-decreasing order of the
    /// squared Euclidean distance between its envelope and the given one.
    ///
    /// Records whose envelope overlaps the given one come first, at distance
    /// zero. Ties are broken in an unspecified but deterministic order.
    /// Returning [`Visit::Stop`] from the callback terminates the search
    /// reporting success, while [`Visit::Abort`] terminates it surfacing the
    /// carried error.
    pub fn priority_search<E>(
        &self,
        query: Envelope<T>,
        mut visit: impl FnMut(usize) -> Visit<E>,
    ) -> Result<(), E> {
        let Some(root) = self.root else {
            return Ok(());
        };

        let mut queue = BinaryHeap::new();
        self.enqueue(root, &query, &mut queue);

        while let Some(nearest) = queue.pop() {
            if nearest.has_child {
                self.enqueue(nearest.data, &query, &mut queue);
                continue;
            }

            match visit(nearest.data) {
                Visit::Continue => {}
                Visit::Stop => return Ok(()),
                Visit::Abort(error) => return Err(error),
            }
        }

        Ok(())
    }

    /// Pushes every entry of the given node into the queue.
    fn enqueue(&self, node: usize, query: &Envelope<T>, queue: &mut BinaryHeap<Queued<T>>) {
        let node = &self.nodes[node];
        for entry in &node.entries[..node.num_entries] {
            queue.push(Queued {
                distance: entry.envelope.squared_distance(query),
                data: entry.data,
                has_child: !node.is_leaf,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::envelope::Envelope;
    use crate::index::{RTree, Visit};

    fn envelope(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Envelope {
        Envelope {
            min: [min_x, min_y].into(),
            max: [max_x, max_y].into(),
        }
    }

    fn populated() -> RTree {
        let mut tree = RTree::new();
        tree.insert(envelope(0., 0., 1., 1.), 0);
        tree.insert(envelope(5., 5., 6., 6.), 1);
        tree
    }

    #[test]
    fn records_come_out_by_increasing_distance() {
        let tree = populated();

        let mut got = Vec::new();
        let result: Result<(), ()> = tree.priority_search(envelope(4., 4., 4., 4.), |record| {
            got.push(record);
            Visit::Continue
        });

        assert_eq!(result, Ok(()));
        assert_eq!(got, vec![1, 0]);
    }

    #[test]
    fn stop_terminates_the_search_as_success() {
        let tree = populated();

        let mut got = Vec::new();
        let result: Result<(), ()> = tree.priority_search(envelope(4., 4., 4., 4.), |record| {
            got.push(record);
            Visit::Stop
        });

        assert_eq!(result, Ok(()));
        assert_eq!(got, vec![1], "the first record must stop the search");
    }

    #[test]
    fn abort_surfaces_the_callback_error() {
        let tree = populated();

        let result = tree.priority_search(envelope(4., 4., 4., 4.), |record| {
            Visit::Abort(format!("record {record} is unexpected"))
        });

        assert_eq!(result, Err("record 1 is unexpected".to_string()));
    }

    #[test]
    fn searching_an_empty_tree_visits_nothing() {
        let tree = RTree::new();

        let result: Result<(), ()> = tree.priority_search(envelope(0., 0., 1., 1.), |_| {
            Visit::Abort(())
        });

        assert_eq!(result, Ok(()));
    }
}
