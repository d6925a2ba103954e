use std::str::from_utf8;

use tracing::debug;

use crate::{
    bbox::Bbox,
    error::{Error, Result},
    input::geojson,
};

/// Characters separating the numbers on a line
fn is_separator(c: char) -> bool {
    c == ' ' || c == ',' || c == '\t'
}

/// Parses the numbers on a single line. `Ok(None)` means the line is empty.
/// Infinities and NaN are not numbers here.
fn parse_line(line: &str) -> Result<Option<Vec<f64>>> {
    let mut numbers = Vec::new();
    for (i, token) in line.split(is_separator).filter(|t| !t.is_empty()).enumerate() {
        let n = token
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| Error::InvalidToken {
                position: i + 1,
                value: token.to_string(),
            })?;
        numbers.push(n);
    }
    Ok(if numbers.is_empty() {
        None
    } else {
        Some(numbers)
    })
}

/// Parses plain-text coordinates
///
/// Each line must contain either a point (`x y`) or a box (`left bottom
/// right top`). Numbers may be separated by spaces, commas, or tabs. All
/// lines must have as many numbers as the first one. The result covers all
/// lines.
pub fn parse_text(bytes: &[u8]) -> Result<Bbox> {
    let text = from_utf8(bytes).map_err(|_| Error::InvalidInput("input is not UTF-8".into()))?;

    let mut expected_len = None;
    let mut result: Option<Bbox> = None;
    for (i, line) in text.lines().enumerate() {
        let Some(numbers) = parse_line(line)? else {
            continue;
        };

        let expected = *expected_len.get_or_insert(numbers.len());
        if numbers.len() != expected {
            return Err(Error::InvalidInput(format!(
                "line {} has {} numbers but previous lines have {}",
                i + 1,
                numbers.len(),
                expected
            )));
        }

        let bbox = match numbers[..] {
            [x, y] => Bbox::from_point(x, y),
            [left, bottom, right, top] => Bbox::new(left, bottom, right, top),
            _ => {
                return Err(Error::InvalidInput(format!(
                    "line {} has {} numbers (expected 2 or 4)",
                    i + 1,
                    numbers.len()
                )))
            }
        };

        result = Some(match result {
            Some(r) => r.union(&bbox),
            None => bbox,
        });
    }

    result.ok_or_else(|| Error::InvalidInput("no coordinates found".into()))
}

/// Parses raw input, which may either be GeoJSON or plain-text coordinates
///
/// GeoJSON is tried first. Only if the input is not GeoJSON at all is it
/// parsed as text. A GeoJSON document without usable features is an error
/// and is never reinterpreted.
pub fn parse(bytes: &[u8]) -> Result<Bbox> {
    match geojson::parse(bytes) {
        Err(Error::CouldNotParseGeoJSON) => {
            debug!("Input is not GeoJSON. Parsing it as plain-text coordinates.");
            parse_text(bytes)
        }
        r => r,
    }
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion};

    use crate::{bbox::Bbox, error::Error};

    use super::parse;

    fn parse_str(s: &str) -> Result<Bbox, Error> {
        parse(s.as_bytes())
    }

    /// A single box
    #[test]
    fn single_box() {
        let bbox = parse_str("1.0 2.0 3.0 4.0").unwrap();
        assert_that!(bbox).is_equal_to(Bbox::new(1.0, 2.0, 3.0, 4.0));
    }

    /// A single point is a degenerate box
    #[test]
    fn single_point() {
        let bbox = parse_str("  -7.5,\t13\n").unwrap();
        assert_that!(bbox).is_equal_to(Bbox::from_point(-7.5, 13.0));
    }

    /// Separators can be mixed and repeated
    #[test]
    fn separators() {
        let bbox = parse_str("1, 2,,3\t\t4").unwrap();
        assert_that!(bbox).is_equal_to(Bbox::new(1.0, 2.0, 3.0, 4.0));
    }

    /// Multiple lines are combined
    #[test]
    fn multiple_lines() {
        let bbox = parse_str("0 0\n\n5 -1\r\n2 8\n").unwrap();
        assert_that!(bbox).is_equal_to(Bbox::new(0.0, -1.0, 5.0, 8.0));

        let bbox = parse_str("0 0 1 1\n-3 4 -2 6").unwrap();
        assert_that!(bbox).is_equal_to(Bbox::new(-3.0, 0.0, 1.0, 6.0));
    }

    /// Tokens must be numbers
    #[test]
    fn invalid_token() {
        match parse_str("1.0 xyz 3.0 4.0").unwrap_err() {
            Error::InvalidToken { position, value } => {
                assert_that!(position).is_equal_to(2);
                assert_that!(value).is_equal_to("xyz".to_string());
            }
            e => panic!("unexpected error: {e:?}"),
        }
    }

    /// Tokens must be finite numbers
    #[test]
    fn non_finite_token() {
        match parse_str("inf inf -inf -inf").unwrap_err() {
            Error::InvalidToken { position, value } => {
                assert_that!(position).is_equal_to(1);
                assert_that!(value).is_equal_to("inf".to_string());
            }
            e => panic!("unexpected error: {e:?}"),
        }

        match parse_str("0 0\n1 NaN").unwrap_err() {
            Error::InvalidToken { position, value } => {
                assert_that!(position).is_equal_to(2);
                assert_that!(value).is_equal_to("NaN".to_string());
            }
            e => panic!("unexpected error: {e:?}"),
        }

        assert!(matches!(
            parse_str("1 2 infinity 4"),
            Err(Error::InvalidToken { position: 3, .. })
        ));
    }

    /// Lines must have two or four numbers
    #[test]
    fn wrong_count() {
        assert!(matches!(parse_str("1.0 2.0 3.0"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_str("1"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_str("1 2 3 4 5"), Err(Error::InvalidInput(_))));
    }

    /// All lines must have as many numbers as the first one
    #[test]
    fn ragged_lines() {
        assert!(matches!(parse_str("1 2\n0 0 5 5"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_str("0 0 5 5\n1 2"), Err(Error::InvalidInput(_))));
    }

    /// Empty input has no coordinates
    #[test]
    fn empty() {
        assert!(matches!(parse_str(""), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_str("\n \n,,\n"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse(&[0xff, 0xfe]), Err(Error::InvalidInput(_))));
    }

    /// GeoJSON is detected before text
    #[test]
    fn geojson() {
        let bbox = parse_str(r#"{"type": "Point", "coordinates": [1, 2]}"#).unwrap();
        assert_that!(bbox).is_equal_to(Bbox::from_point(1.0, 2.0));

        let bbox = parse_str("[[1, 2], [3, 4]]").unwrap();
        assert_that!(bbox).is_equal_to(Bbox::new(1.0, 2.0, 3.0, 4.0));
    }

    /// Broken GeoJSON is not reinterpreted as text
    #[test]
    fn broken_geojson() {
        let r = parse_str(r#"{"type": "FeatureCollection", "features": []}"#);
        assert!(matches!(r, Err(Error::NoFeaturesFound)));

        let r = parse_str(r#"{"type": "Feature", "geometry": null}"#);
        assert!(matches!(r, Err(Error::NoValidCoordinatesFound)));
    }
}
