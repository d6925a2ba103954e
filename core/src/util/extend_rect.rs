use geo::{coord, Rect};

/// Trait for bounding box accumulators that grow as points and rectangles
/// are added to them
///
/// It is implemented for `Option<Rect>`, where [`None`] is the state in
/// which nothing has been accumulated yet. This avoids seeding the
/// accumulator with infinite bounds that could leak into a result.
///
/// # Examples
///
/// ```rust
/// use geo::{coord, Rect};
/// use boxfinder_core::util::extend_rect::ExtendRect;
///
/// let mut acc: Option<Rect> = None;
///
/// acc.extend_point(1.0, 2.0);
/// let r = acc.unwrap();
/// assert_eq!(r.min(), coord! { x: 1.0, y: 2.0 });
/// assert_eq!(r.max(), coord! { x: 1.0, y: 2.0 });
///
/// acc.extend_point(5.0, 6.0);
/// acc.extend_point(-7.0, -6.0);
/// let r = acc.unwrap();
/// assert_eq!(r.min(), coord! { x: -7.0, y: -6.0 });
/// assert_eq!(r.max(), coord! { x: 5.0, y: 6.0 });
/// ```
///
/// ```rust
/// use geo::{coord, Rect};
/// use boxfinder_core::util::extend_rect::ExtendRect;
///
/// let mut acc: Option<Rect> = None;
/// acc.extend_rect(&Rect::new(
///     coord! { x: 1.0, y: 2.0 },
///     coord! { x: 4.0, y: 5.0 },
/// ));
/// acc.extend_rect(&Rect::new(
///     coord! { x: 40.0, y: 50.0 },
///     coord! { x: 70.0, y: 80.0 },
/// ));
///
/// let r = acc.unwrap();
/// assert_eq!(r.min(), coord! { x: 1.0, y: 2.0 });
/// assert_eq!(r.max(), coord! { x: 70.0, y: 80.0 });
/// ```
pub trait ExtendRect {
    /// Extends the accumulated rectangle so it overlaps the given point
    fn extend_point(&mut self, x: f64, y: f64);

    /// Extends the accumulated rectangle so it overlaps the given other
    /// rectangle
    fn extend_rect(&mut self, other: &Rect);
}

impl ExtendRect for Option<Rect> {
    fn extend_point(&mut self, x: f64, y: f64) {
        match self {
            Some(r) => {
                let min = r.min();
                r.set_min((min.x.min(x), min.y.min(y)));
                let max = r.max();
                r.set_max((max.x.max(x), max.y.max(y)));
            }
            None => *self = Some(Rect::new(coord! { x: x, y: y }, coord! { x: x, y: y })),
        }
    }

    fn extend_rect(&mut self, other: &Rect) {
        match self {
            Some(r) => {
                let min = r.min();
                let other_min = other.min();
                r.set_min((min.x.min(other_min.x), min.y.min(other_min.y)));
                let max = r.max();
                let other_max = other.max();
                r.set_max((max.x.max(other_max.x), max.y.max(other_max.y)));
            }
            None => *self = Some(*other),
        }
    }
}
