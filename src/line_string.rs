use crate::{point::Point, segment::Segment};

/// An ordered chain of vertices describing an open shape.
///
/// Construction never validates: a line string may be empty, open or closed.
/// The rings of a [`Polygon`](crate::polygon::Polygon) are line strings whose
/// last vertex repeats the first.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LineString<T = f64> {
    /// The ordered list of vertices describing the line string.
    pub vertices: Vec<Point<T>>,
}

impl<T, P> From<Vec<P>> for LineString<T>
where
    P: Into<Point<T>>,
{
    fn from(vertices: Vec<P>) -> Self {
        Self {
            vertices: vertices.into_iter().map(Into::into).collect(),
        }
    }
}

impl<T> LineString<T>
where
    T: PartialEq,
{
    /// Returns an ordered iterator over the segments of the line string,
    /// skipping the degenerate ones between consecutive coincident vertices.
    pub fn segments(&self) -> impl Iterator<Item = Segment<'_, T>> {
        self.vertices
            .iter()
            .zip(self.vertices.iter().skip(1))
            .filter(|(from, to)| from != to)
            .map(Segment::from)
    }
}
