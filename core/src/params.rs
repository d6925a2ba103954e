/// The untyped input a bounding box is resolved from. Exactly one way of
/// building a box (see [`crate::resolve::Strategy`]) must be applicable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputParams {
    /// Explicit bounds. [`None`] means "not given", which is different from
    /// `Some(0.0)`.
    pub left: Option<f64>,
    pub bottom: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,

    /// A center coordinate, should contain exactly two elements
    pub center: Option<Vec<f64>>,

    /// Sizes of the box. Empty if not given.
    pub width: String,
    pub height: String,

    /// Raw coordinates or GeoJSON
    pub raw: Option<Vec<u8>>,

    /// Paths to GeoJSON files or shapefiles
    pub file: Vec<String>,

    /// A place name to geocode. Empty if not given.
    pub place: String,

    /// A buffer to apply to the resolved box on all sides
    pub buffer: f64,
}

/// Identifies a field of [`InputParams`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Left,
    Bottom,
    Right,
    Top,
    Center,
    Width,
    Height,
    Raw,
    File,
    Place,
    Buffer,
}

impl Field {
    /// All fields in declaration order
    pub const ALL: [Field; 11] = [
        Field::Left,
        Field::Bottom,
        Field::Right,
        Field::Top,
        Field::Center,
        Field::Width,
        Field::Height,
        Field::Raw,
        Field::File,
        Field::Place,
        Field::Buffer,
    ];

    /// The field's user-facing name
    pub fn name(self) -> &'static str {
        match self {
            Field::Left => "left",
            Field::Bottom => "bottom",
            Field::Right => "right",
            Field::Top => "top",
            Field::Center => "center",
            Field::Width => "width",
            Field::Height => "height",
            Field::Raw => "raw",
            Field::File => "file",
            Field::Place => "place",
            Field::Buffer => "buffer",
        }
    }
}

impl InputParams {
    /// Returns `true` if the given field has been set. Optional fields are
    /// set if they are present (even if their value is zero), strings and
    /// lists if they are not empty, and the buffer if it is not zero.
    pub fn is_set(&self, field: Field) -> bool {
        match field {
            Field::Left => self.left.is_some(),
            Field::Bottom => self.bottom.is_some(),
            Field::Right => self.right.is_some(),
            Field::Top => self.top.is_some(),
            Field::Center => self.center.is_some(),
            Field::Width => !self.width.is_empty(),
            Field::Height => !self.height.is_empty(),
            Field::Raw => self.raw.is_some(),
            Field::File => !self.file.is_empty(),
            Field::Place => !self.place.is_empty(),
            Field::Buffer => self.buffer != 0.0,
        }
    }

    /// Iterates over all fields that have been set
    pub fn set_fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(|f| self.is_set(*f))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Field, InputParams};

    /// Nothing is set by default
    #[test]
    fn empty() {
        let p = InputParams::default();
        assert_eq!(p.set_fields().count(), 0);
    }

    /// An explicit zero counts as set
    #[test]
    fn explicit_zero() {
        let p = InputParams {
            left: Some(0.0),
            center: Some(vec![]),
            raw: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(
            p.set_fields().collect::<Vec<_>>(),
            vec![Field::Left, Field::Center, Field::Raw]
        );
    }

    /// Strings and lists count as set if they are not empty
    #[test]
    fn strings_and_lists() {
        let p = InputParams {
            width: "4".to_string(),
            file: vec!["a.json".to_string()],
            place: "Berlin".to_string(),
            buffer: -1.0,
            ..Default::default()
        };
        assert_eq!(
            p.set_fields().collect::<Vec<_>>(),
            vec![Field::Width, Field::File, Field::Place, Field::Buffer]
        );
    }
}
