use crate::input::shapefile;

/// The number of bytes inspected to classify an input stream
pub const SNIFF_PREFIX_LEN: usize = 8192;

/// The format of an input stream as guessed from its first bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    GeoJson,
    Shapefile,
    Unrecognized,
}

/// Substrings that indicate a JSON document is GeoJSON
const GEOJSON_KEYS: [&str; 4] = ["\"type\"", "\"geometry\"", "\"coordinates\"", "\"features\""];

/// Returns `true` if `prefix` looks like a GeoJSON document or a bare
/// coordinate array
pub fn looks_like_geojson(prefix: &[u8]) -> bool {
    let trimmed = prefix.trim_ascii_start();
    if !matches!(trimmed.first(), Some(b'{') | Some(b'[')) {
        return false;
    }

    let lower = String::from_utf8_lossy(trimmed).to_lowercase();
    if GEOJSON_KEYS.iter().any(|k| lower.contains(k)) {
        return true;
    }

    trimmed.iter().all(|c| {
        matches!(c, b'[' | b']' | b',' | b'.' | b'-' | b'0'..=b'9' | b'\0') || c.is_ascii_whitespace()
    })
}

/// Classifies a stream by looking at its first bytes
pub fn classify(prefix: &[u8]) -> Format {
    if looks_like_geojson(prefix) {
        Format::GeoJson
    } else if shapefile::has_signature(prefix) {
        Format::Shapefile
    } else {
        Format::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion};

    use crate::input::shapefile::tests::header;

    use super::{classify, looks_like_geojson, Format};

    /// GeoJSON objects are recognized by their keys
    #[test]
    fn geojson_object() {
        let json = r#"  {"type": "FeatureCollection", "features": []}"#;
        assert_that!(classify(json.as_bytes())).is_equal_to(Format::GeoJson);

        let json = "\n{\"TYPE\": \"Point\"}";
        assert_that!(classify(json.as_bytes())).is_equal_to(Format::GeoJson);

        let json = r#"[{"geometry": null}]"#;
        assert_that!(classify(json.as_bytes())).is_equal_to(Format::GeoJson);
    }

    /// JSON without GeoJSON keys is not recognized
    #[test]
    fn plain_json() {
        let json = r#"{"name": "value"}"#;
        assert_that!(classify(json.as_bytes())).is_equal_to(Format::Unrecognized);
    }

    /// Bare coordinate arrays are recognized
    #[test]
    fn coordinate_array() {
        let json = "[[0, 0], [1.5, -2.25]]\n\0";
        assert_that!(classify(json.as_bytes())).is_equal_to(Format::GeoJson);

        let json = "[[0, 0], [1e5, 2]]";
        assert_that!(classify(json.as_bytes())).is_equal_to(Format::Unrecognized);
    }

    /// Documents must start with a bracket or brace
    #[test]
    fn leading_text() {
        let json = r#"x{"type": "Point"}"#;
        assert_that!(classify(json.as_bytes())).is_equal_to(Format::Unrecognized);
        assert_that!(classify(b"")).is_equal_to(Format::Unrecognized);
        assert_that!(classify(b"   ")).is_equal_to(Format::Unrecognized);
    }

    /// Shapefiles are recognized by their file code
    #[test]
    fn shapefile() {
        let buf = header(0.0, 0.0, 1.0, 1.0);
        assert_that!(classify(&buf)).is_equal_to(Format::Shapefile);
        assert_that!(classify(&buf[0..50])).is_equal_to(Format::Unrecognized);
    }

    /// A shapefile header never looks like GeoJSON, even if it is followed
    /// by JSON text
    #[test]
    fn shapefile_is_not_geojson() {
        let mut buf = header(0.0, 0.0, 1.0, 1.0);
        buf.extend_from_slice(br#"{"type": "Point", "coordinates": [1, 2]}"#);
        assert_that!(looks_like_geojson(&buf)).is_equal_to(false);
        assert_that!(classify(&buf)).is_equal_to(Format::Shapefile);
    }
}
