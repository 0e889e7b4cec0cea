use crate::{line_string::LineString, point::Point, polygon::Polygon};

/// A geometry in the plane.
///
/// The variants mirror the simple-features taxonomy. Every variant is a
/// plain data constructor: no geometry is validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<T = f64> {
    Point(Point<T>),
    MultiPoint(Vec<Point<T>>),
    LineString(LineString<T>),
    MultiLineString(Vec<LineString<T>>),
    Polygon(Polygon<T>),
    MultiPolygon(Vec<Polygon<T>>),
    Collection(Vec<Geometry<T>>),
}

impl<T> From<Point<T>> for Geometry<T> {
    fn from(point: Point<T>) -> Self {
        Self::Point(point)
    }
}

impl<T> From<LineString<T>> for Geometry<T> {
    fn from(line_string: LineString<T>) -> Self {
        Self::LineString(line_string)
    }
}

impl<T> From<Polygon<T>> for Geometry<T> {
    fn from(polygon: Polygon<T>) -> Self {
        Self::Polygon(polygon)
    }
}

impl<T> Geometry<T>
where
    T: Copy + PartialEq,
{
    /// Appends to the given list every non-degenerate segment of this
    /// geometry, as owned endpoint pairs: the segments of its line strings
    /// and the boundaries of its polygons, recursing into multi-geometries
    /// and collections.
    pub(crate) fn segments_into(&self, segments: &mut Vec<[Point<T>; 2]>) {
        let append = |line_string: &LineString<T>, segments: &mut Vec<[Point<T>; 2]>| {
            segments.extend(
                line_string
                    .segments()
                    .map(|segment| [*segment.from, *segment.to]),
            );
        };

        match self {
            Geometry::LineString(line_string) => append(line_string, segments),
            Geometry::MultiLineString(line_strings) => {
                for line_string in line_strings {
                    append(line_string, segments);
                }
            }
            Geometry::Polygon(polygon) => {
                for ring in &polygon.rings {
                    append(ring, segments);
                }
            }
            Geometry::MultiPolygon(polygons) => {
                for polygon in polygons {
                    for ring in &polygon.rings {
                        append(ring, segments);
                    }
                }
            }
            Geometry::Collection(children) => {
                for child in children {
                    child.segments_into(segments);
                }
            }
            Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        }
    }

    /// Appends to the given list every vertex contributed by the point
    /// geometries of this geometry, recursing into collections.
    pub(crate) fn points_into(&self, points: &mut Vec<Point<T>>) {
        match self {
            Geometry::Point(point) => points.push(*point),
            Geometry::MultiPoint(vertices) => points.extend_from_slice(vertices),
            Geometry::Collection(children) => {
                for child in children {
                    child.points_into(points);
                }
            }
            _ => {}
        }
    }
}
