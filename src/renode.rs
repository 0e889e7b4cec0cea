use std::cmp::Ordering;
use std::convert::Infallible;

use num_traits::Float;

use crate::{
    envelope::Envelope,
    geometry::Geometry,
    index::{RTree, Visit},
    line_string::LineString,
    point::Point,
    polygon::Polygon,
    segment::{Crossing, Segment},
    tolerance::Tolerance,
};

/// The lines and points a geometry is renoded against.
///
/// A cut set is built once from a source geometry and never mutated
/// afterwards, so it may be shared freely among concurrent renode calls.
#[derive(Debug, Clone)]
pub struct CutSet<T = f64> {
    /// Every non-degenerate segment contributed by the source, as owned
    /// endpoint pairs.
    segments: Vec<[Point<T>; 2]>,
    /// The index over the segment envelopes.
    segment_index: RTree<T>,
    /// Every vertex contributed by the point geometries of the source.
    points: Vec<Point<T>>,
    /// The index over the degenerate point envelopes.
    point_index: RTree<T>,
}

impl<T> CutSet<T>
where
    T: Float,
{
    /// Collects the cut lines and cut points of the given geometry.
    ///
    /// Line strings and the boundaries of polygons contribute their
    /// non-degenerate segments; point geometries contribute their vertices;
    /// collections contribute recursively.
    pub fn new(source: &Geometry<T>) -> Self {
        let mut segments = Vec::new();
        source.segments_into(&mut segments);

        let mut points = Vec::new();
        source.points_into(&mut points);

        let mut segment_index = RTree::new();
        for (position, [from, to]) in segments.iter().enumerate() {
            segment_index.insert(Envelope::spanning(from, to), position);
        }

        let mut point_index = RTree::new();
        for (position, point) in points.iter().enumerate() {
            point_index.insert(Envelope::from(*point), position);
        }

        Self {
            segments,
            segment_index,
            points,
            point_index,
        }
    }
}

/// Rewrites every edge of the given geometry so that each crossing with a
/// cut line and each incident cut point becomes an explicit vertex, while
/// the direction of every original edge is preserved.
///
/// Point and multi point geometries carry no edges and are returned
/// unchanged. Reconstruction never validates: the output may be simpler than
/// the input (degenerate edges are suppressed) but it is always built.
pub fn renode<T>(geometry: &Geometry<T>, cut: &CutSet<T>, tolerance: &Tolerance<T>) -> Geometry<T>
where
    T: Float,
{
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => geometry.clone(),
        Geometry::LineString(line_string) => {
            Geometry::LineString(renode_line_string(line_string, cut, tolerance))
        }
        Geometry::MultiLineString(line_strings) => Geometry::MultiLineString(
            line_strings
                .iter()
                .map(|line_string| renode_line_string(line_string, cut, tolerance))
                .collect(),
        ),
        Geometry::Polygon(polygon) => Geometry::Polygon(renode_polygon(polygon, cut, tolerance)),
        Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
            polygons
                .iter()
                .map(|polygon| renode_polygon(polygon, cut, tolerance))
                .collect(),
        ),
        Geometry::Collection(children) => Geometry::Collection(
            children
                .iter()
                .map(|child| renode(child, cut, tolerance))
                .collect(),
        ),
    }
}

/// Renodes every ring of the polygon, each being a closed line string.
fn renode_polygon<T>(polygon: &Polygon<T>, cut: &CutSet<T>, tolerance: &Tolerance<T>) -> Polygon<T>
where
    T: Float,
{
    Polygon {
        rings: polygon
            .rings
            .iter()
            .map(|ring| renode_line_string(ring, cut, tolerance))
            .collect(),
    }
}

fn renode_line_string<T>(
    line_string: &LineString<T>,
    cut: &CutSet<T>,
    tolerance: &Tolerance<T>,
) -> LineString<T>
where
    T: Float,
{
    let mut vertices: Vec<Point<T>> = Vec::with_capacity(line_string.vertices.len());

    for segment in line_string.segments() {
        let candidates = renode_segment(&segment, cut, tolerance);

        // The previous edge already contributed this edge's first vertex.
        let skip = usize::from(!vertices.is_empty());
        vertices.extend(candidates.into_iter().skip(skip));
    }

    LineString { vertices }
}

/// Returns the ordered vertices the given edge must be rewritten into: its
/// endpoints, every crossing with a cut line, and every incident cut point,
/// from the edge's start to its end.
fn renode_segment<T>(
    segment: &Segment<'_, T>,
    cut: &CutSet<T>,
    tolerance: &Tolerance<T>,
) -> Vec<Point<T>>
where
    T: Float,
{
    let envelope = segment.envelope();
    let mut candidates = vec![*segment.from, *segment.to];

    let _: Result<(), Infallible> = cut.segment_index.range_search(envelope, |position| {
        let [from, to] = &cut.segments[position];
        match segment.intersection(&Segment { from, to }) {
            Some(Crossing::Point(point)) => candidates.push(point),
            Some(Crossing::Span([first, second])) => {
                candidates.push(first);
                candidates.push(second);
            }
            None => {}
        }

        Visit::Continue
    });

    let _: Result<(), Infallible> = cut.point_index.range_search(envelope, |position| {
        let point = cut.points[position];
        if segment.contains(&point, tolerance) {
            candidates.push(point);
        }

        Visit::Continue
    });

    candidates.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    candidates.dedup();

    // The candidates came out in lexicographic order; flip them whenever
    // that order disagrees with the direction of the edge.
    if candidates.first() != Some(segment.from) {
        candidates.reverse();
    }

    candidates
}

#[cfg(test)]
mod tests {
    use crate::geometry::Geometry;
    use crate::renode::CutSet;
    use crate::tolerance::Tolerance;

    use super::renode;

    #[test]
    fn cut_set_collects_lines_and_points() {
        let source = Geometry::Collection(vec![
            Geometry::LineString(vec![[0., 0.], [1., 0.], [1., 0.], [2., 0.]].into()),
            Geometry::Point([5., 5.].into()),
            Geometry::MultiPoint(vec![[6., 6.].into()]),
        ]);

        let cut = CutSet::new(&source);
        assert_eq!(cut.segments.len(), 2, "degenerate segments are skipped");
        assert_eq!(cut.points.len(), 2);
    }

    #[test]
    fn renoding_against_an_empty_cut_set_is_the_identity() {
        let cut = CutSet::new(&Geometry::Collection(Vec::new()));
        let geometry = Geometry::LineString(vec![[0., 0.], [5., 5.], [10., 0.]].into());

        let got = renode(&geometry, &cut, &Tolerance::default());
        assert_eq!(got, geometry);
    }
}
