use num_traits::Float;

use crate::point::Point;

/// An axis-aligned rectangle delimited by its two extreme corners.
///
/// The invariant `min.x <= max.x && min.y <= max.y` is assumed by every
/// operation but never enforced here; constructors that cannot guarantee it
/// must order the coordinates themselves.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Envelope<T = f64> {
    /// The corner with the smallest coordinates.
    pub min: Point<T>,
    /// The corner with the largest coordinates.
    pub max: Point<T>,
}

impl<T> From<Point<T>> for Envelope<T>
where
    T: Copy,
{
    /// Returns the degenerate envelope covering a single point.
    fn from(point: Point<T>) -> Self {
        Self {
            min: point,
            max: point,
        }
    }
}

impl<T> Envelope<T>
where
    T: Float,
{
    /// Returns the smallest envelope spanning the two given points, in any
    /// order.
    pub fn spanning(a: &Point<T>, b: &Point<T>) -> Self {
        Self {
            min: Point {
                x: a.x.min(b.x),
                y: a.y.min(b.y),
            },
            max: Point {
                x: a.x.max(b.x),
                y: a.y.max(b.y),
            },
        }
    }

    /// Returns true if, and only if, self and rhs share at least one point.
    ///
    /// Envelopes are closed: touching edges or corners count as overlap.
    pub fn overlaps(&self, rhs: &Self) -> bool {
        self.min.x <= rhs.max.x
            && rhs.min.x <= self.max.x
            && self.min.y <= rhs.max.y
            && rhs.min.y <= self.max.y
    }

    /// Returns the smallest envelope enclosing both self and rhs.
    pub fn combine(&self, rhs: &Self) -> Self {
        Self {
            min: Point {
                x: self.min.x.min(rhs.min.x),
                y: self.min.y.min(rhs.min.y),
            },
            max: Point {
                x: self.max.x.max(rhs.max.x),
                y: self.max.y.max(rhs.max.y),
            },
        }
    }

    /// Returns the area covered by self.
    pub fn area(&self) -> T {
        (self.max.x - self.min.x) * (self.max.y - self.min.y)
    }

    /// Returns how much the area of self grows when combined with rhs.
    pub fn enlargement(&self, rhs: &Self) -> T {
        self.combine(rhs).area() - self.area()
    }

    /// Returns the squared length of the shortest straight line joining self
    /// and rhs, which is zero whenever they overlap.
    pub fn squared_distance(&self, rhs: &Self) -> T {
        let dx = (self.min.x - rhs.max.x)
            .max(rhs.min.x - self.max.x)
            .max(T::zero());
        let dy = (self.min.y - rhs.max.y)
            .max(rhs.min.y - self.max.y)
            .max(T::zero());

        dx * dx + dy * dy
    }
}
