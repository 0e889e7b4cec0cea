use num_traits::Float;

use crate::{
    envelope::Envelope,
    point::Point,
    tolerance::{IsClose, Tolerance},
};

/// The straight line between two endpoints.
#[derive(Debug, Clone, Copy)]
pub struct Segment<'a, T = f64> {
    /// The first point in the segment.
    pub from: &'a Point<T>,
    /// The last point in the segment.
    pub to: &'a Point<T>,
}

impl<'a, T> From<(&'a Point<T>, &'a Point<T>)> for Segment<'a, T> {
    fn from((from, to): (&'a Point<T>, &'a Point<T>)) -> Self {
        Self { from, to }
    }
}

/// The intersection between two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing<T> {
    /// The segments meet at a single point.
    Point(Point<T>),
    /// The segments run along a common span delimited by two points.
    Span([Point<T>; 2]),
}

impl<T> Segment<'_, T>
where
    T: Float,
{
    /// Returns the envelope spanning this segment.
    pub fn envelope(&self) -> Envelope<T> {
        Envelope::spanning(self.from, self.to)
    }

    /// Returns the distance between the two endpoints of the segment.
    pub fn length(&self) -> T {
        self.from.distance(self.to)
    }

    /// Returns the scalar cross product of the direction of self with the
    /// vector from self's start to the given point.
    fn cross(&self, point: &Point<T>) -> T {
        (self.to.x - self.from.x) * (point.y - self.from.y)
            - (point.x - self.from.x) * (self.to.y - self.from.y)
    }

    /// Returns true if, and only if, the given point lies on this segment.
    pub fn contains(&self, point: &Point<T>, tolerance: &Tolerance<T>) -> bool {
        (self.from.distance(point) + self.to.distance(point)).is_close(&self.length(), tolerance)
    }

    /// Returns the intersection between this segment and the other, if any.
    ///
    /// Crossing segments yield a single point; collinear segments sharing
    /// more than one point yield the two endpoints of the shared span.
    pub fn intersection(&self, other: &Self) -> Option<Crossing<T>> {
        let determinant = (self.from.x - self.to.x) * (other.from.y - other.to.y)
            - (self.from.y - self.to.y) * (other.from.x - other.to.x);

        if determinant.is_zero() {
            // Parallel or collinear: nothing in common unless the supporting
            // lines coincide.
            return self
                .cross(other.from)
                .is_zero()
                .then(|| self.collinear_overlap(other))
                .flatten();
        }

        let t = ((self.from.x - other.from.x) * (other.from.y - other.to.y)
            - (self.from.y - other.from.y) * (other.from.x - other.to.x))
            / determinant;
        if !(T::zero()..=T::one()).contains(&t) {
            return None;
        }

        let u = -((self.from.x - self.to.x) * (self.from.y - other.from.y)
            - (self.from.y - self.to.y) * (self.from.x - other.from.x))
            / determinant;
        if !(T::zero()..=T::one()).contains(&u) {
            return None;
        }

        Some(Crossing::Point(Point {
            x: self.from.x + t * (self.to.x - self.from.x),
            y: self.from.y + t * (self.to.y - self.from.y),
        }))
    }

    /// Being self and the other collinear, returns the points they share.
    fn collinear_overlap(&self, other: &Self) -> Option<Crossing<T>> {
        // Order the endpoints along the shared line by projecting them on
        // the dominant axis of self.
        let on_x = (self.to.x - self.from.x).abs() > (self.to.y - self.from.y).abs();
        let project = |point: &Point<T>| if on_x { point.x } else { point.y };

        let lo = T::max(
            project(self.from).min(project(self.to)),
            project(other.from).min(project(other.to)),
        );
        let hi = T::min(
            project(self.from).max(project(self.to)),
            project(other.from).max(project(other.to)),
        );

        if hi < lo {
            return None;
        }

        let at = |scalar: T| {
            let u = (scalar - project(self.from)) / (project(self.to) - project(self.from));
            Point {
                x: self.from.x + u * (self.to.x - self.from.x),
                y: self.from.y + u * (self.to.y - self.from.y),
            }
        };

        if lo == hi {
            return Some(Crossing::Point(at(lo)));
        }

        Some(Crossing::Span([at(lo), at(hi)]))
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        point::Point,
        segment::{Crossing, Segment},
        tolerance::Tolerance,
    };

    #[test]
    fn intersection() {
        struct Test<'a> {
            name: &'a str,
            segment: Segment<'a, f64>,
            other: Segment<'a, f64>,
            want: Option<Crossing<f64>>,
        }

        vec![
            Test {
                name: "non-crossing segments",
                segment: Segment {
                    from: &[4., 4.].into(),
                    to: &[8., 8.].into(),
                },
                other: Segment {
                    from: &[0., 4.].into(),
                    to: &[4., 0.].into(),
                },
                want: None,
            },
            Test {
                name: "perpendicular with no common endpoint",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[4., 4.].into(),
                },
                other: Segment {
                    from: &[0., 4.].into(),
                    to: &[4., 0.].into(),
                },
                want: Some(Crossing::Point([2., 2.].into())),
            },
            Test {
                name: "perpendicular with endpoint in line",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[4., 0.].into(),
                },
                other: Segment {
                    from: &[2., 2.].into(),
                    to: &[2., 0.].into(),
                },
                want: Some(Crossing::Point([2., 0.].into())),
            },
            Test {
                name: "perpendicular segments starting at the same point",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[4., 4.].into(),
                },
                other: Segment {
                    from: &[0., 0.].into(),
                    to: &[-4., 4.].into(),
                },
                want: Some(Crossing::Point([0., 0.].into())),
            },
            Test {
                name: "non-collinear parallel segments",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[4., 4.].into(),
                },
                other: Segment {
                    from: &[0., 4.].into(),
                    to: &[4., 8.].into(),
                },
                want: None,
            },
            Test {
                name: "collinear segments sharing a single endpoint",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[4., 4.].into(),
                },
                other: Segment {
                    from: &[0., 0.].into(),
                    to: &[-4., -4.].into(),
                },
                want: Some(Crossing::Point([0., 0.].into())),
            },
            Test {
                name: "collinear segments with no common point",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[4., 4.].into(),
                },
                other: Segment {
                    from: &[-4., -4.].into(),
                    to: &[-2., -2.].into(),
                },
                want: None,
            },
            Test {
                name: "coincident segments when other is shorter",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[4., 4.].into(),
                },
                other: Segment {
                    from: &[0., 0.].into(),
                    to: &[2., 2.].into(),
                },
                want: Some(Crossing::Span([[0., 0.].into(), [2., 2.].into()])),
            },
            Test {
                name: "coincident segments when other contains segment",
                segment: Segment {
                    from: &[1., 1.].into(),
                    to: &[3., 3.].into(),
                },
                other: Segment {
                    from: &[0., 0.].into(),
                    to: &[4., 4.].into(),
                },
                want: Some(Crossing::Span([[1., 1.].into(), [3., 3.].into()])),
            },
            Test {
                name: "coincident when none is fully contained",
                segment: Segment {
                    from: &[-1., 0.].into(),
                    to: &[1., 0.].into(),
                },
                other: Segment {
                    from: &[0., 0.].into(),
                    to: &[2., 0.].into(),
                },
                want: Some(Crossing::Span([[0., 0.].into(), [1., 0.].into()])),
            },
            Test {
                name: "coincident at opposite direction when none is fully contained",
                segment: Segment {
                    from: &[1., 0.].into(),
                    to: &[-1., 0.].into(),
                },
                other: Segment {
                    from: &[0., 0.].into(),
                    to: &[2., 0.].into(),
                },
                want: Some(Crossing::Span([[0., 0.].into(), [1., 0.].into()])),
            },
            Test {
                name: "vertical crossing an horizontal",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[10., 0.].into(),
                },
                other: Segment {
                    from: &[5., -5.].into(),
                    to: &[5., 5.].into(),
                },
                want: Some(Crossing::Point([5., 0.].into())),
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = test.segment.intersection(&test.other);
            assert_eq!(got, test.want, "{}", test.name);
        });
    }

    #[test]
    fn contains() {
        struct Test<'a> {
            name: &'a str,
            segment: Segment<'a, f64>,
            point: Point,
            want: bool,
        }

        vec![
            Test {
                name: "point in the middle of the segment",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[10., 0.].into(),
                },
                point: [3., 0.].into(),
                want: true,
            },
            Test {
                name: "point at an endpoint",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[10., 0.].into(),
                },
                point: [10., 0.].into(),
                want: true,
            },
            Test {
                name: "point on the supporting line but outside the segment",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[10., 0.].into(),
                },
                point: [11., 0.].into(),
                want: false,
            },
            Test {
                name: "point off the supporting line",
                segment: Segment {
                    from: &[0., 0.].into(),
                    to: &[10., 0.].into(),
                },
                point: [5., 1.].into(),
                want: false,
            },
        ]
        .into_iter()
        .for_each(|test| {
            let got = test
                .segment
                .contains(&test.point, &Tolerance::default());
            assert_eq!(got, test.want, "{}", test.name);
        });
    }
}
