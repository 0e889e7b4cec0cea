use crate::line_string::LineString;

/// A closed shape delimited by an exterior ring and any number of interior
/// rings.
///
/// Each ring is a closed [`LineString`] whose last vertex repeats the first.
/// Construction never validates closure, orientation nor nesting.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Polygon<T = f64> {
    /// The boundary rings of the polygon, exterior first.
    pub rings: Vec<LineString<T>>,
}

impl<T> From<LineString<T>> for Polygon<T> {
    /// Returns the polygon delimited by the given ring alone.
    fn from(exterior: LineString<T>) -> Self {
        Self {
            rings: vec![exterior],
        }
    }
}
