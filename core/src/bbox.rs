use std::fmt;

use geo::{coord, Rect};

use crate::error::{Error, Result};

/// An axis-aligned bounding box
///
/// The invariant `right > left && top > bottom` is not enforced on
/// construction. Call [`Bbox::validate`] where it matters.
///
/// # Examples
///
/// ```rust
/// use boxfinder_core::bbox::Bbox;
///
/// let a = Bbox::new(1.0, 2.0, 3.0, 4.0);
/// let b = Bbox::from_point(5.0, -1.0);
/// assert!(a.validate().is_ok());
/// assert!(b.validate().is_err());
///
/// let u = a.union(&b);
/// assert_eq!(u, Bbox::new(1.0, -1.0, 5.0, 4.0));
///
/// let buffered = a.buffer(1.0).unwrap();
/// assert_eq!(buffered, Bbox::new(0.0, 1.0, 4.0, 5.0));
/// assert!(a.buffer(-1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bbox {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl Bbox {
    /// Creates a new bounding box with the given extent
    pub fn new(left: f64, bottom: f64, right: f64, top: f64) -> Self {
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Creates a new bounding box from the given point. The box will have an
    /// area of 0.
    pub fn from_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Checks that the box has a positive extent on both axes
    pub fn validate(&self) -> Result<()> {
        // written with negations so NaN bounds fail too
        if !(self.right > self.left) || !(self.top > self.bottom) {
            return Err(Error::InvalidBbox { bbox: *self });
        }
        Ok(())
    }

    /// Returns `true` if the box does not cover any data, i.e. if one of
    /// its bounds is not finite or if it is inverted. A degenerate box
    /// (a single point) is not empty.
    pub fn is_empty(&self) -> bool {
        let finite = self.left.is_finite()
            && self.bottom.is_finite()
            && self.right.is_finite()
            && self.top.is_finite();
        !finite || self.right < self.left || self.top < self.bottom
    }

    /// Returns the smallest box covering both `self` and `other`
    pub fn union(&self, other: &Bbox) -> Bbox {
        Bbox {
            left: self.left.min(other.left),
            bottom: self.bottom.min(other.bottom),
            right: self.right.max(other.right),
            top: self.top.max(other.top),
        }
    }

    /// Moves all four edges outwards by `amount` (inwards if negative).
    /// Fails if this would collapse or invert an axis.
    pub fn buffer(&self, amount: f64) -> Result<Bbox> {
        let r = Bbox {
            left: self.left - amount,
            bottom: self.bottom - amount,
            right: self.right + amount,
            top: self.top + amount,
        };

        if r.right <= r.left {
            return Err(Error::Shrink {
                width: self.width(),
                amount,
            });
        }
        if r.top <= r.bottom {
            return Err(Error::Shrink {
                width: self.height(),
                amount,
            });
        }

        Ok(r)
    }
}

impl fmt::Display for Bbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.left, self.bottom, self.right, self.top
        )
    }
}

impl From<Rect> for Bbox {
    fn from(r: Rect) -> Self {
        Bbox::new(r.min().x, r.min().y, r.max().x, r.max().y)
    }
}

impl From<Bbox> for Rect {
    fn from(b: Bbox) -> Self {
        Rect::new(
            coord! { x: b.left, y: b.bottom },
            coord! { x: b.right, y: b.top },
        )
    }
}
