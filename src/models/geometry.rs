// src/models/geometry.rs
// DOCUMENTATION: WKT codec for the geography column
// PURPOSE: Convert between typed points and the store's text representation

use geo_types::Point;

/// EWKT prefix expected by the store on geography inserts
const SRID_PREFIX: &str = "SRID=4326;";

/// Encode a point as extended well-known text for a geography insert
/// DOCUMENTATION: Longitude first, per the WKT point convention
/// No range validation - out-of-range degrees pass through to the store
pub fn encode_point(point: Point<f64>) -> String {
    format!("{}POINT({} {})", SRID_PREFIX, point.x(), point.y())
}

/// Decode point well-known text into `(lat, lng)`
///
/// Accepts the `POINT(lng lat)` text form; a coordinate token that fails the
/// float parse yields `None` for that field only. Any other input (notably
/// the hex binary encoding the store may return instead of text) yields
/// `(None, None)` - a lossy fallback, not an error.
pub fn decode_point(raw: &str) -> (Option<f64>, Option<f64>) {
    let inner = match raw
        .strip_prefix("POINT(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => inner,
        None => return (None, None),
    };

    let mut tokens = inner.split(' ');
    let lng = tokens.next().and_then(|t| t.parse::<f64>().ok());
    let lat = tokens.next().and_then(|t| t.parse::<f64>().ok());
    (lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_longitude_first() {
        let ewkt = encode_point(Point::new(-68.83, -32.89));
        assert_eq!(ewkt, "SRID=4326;POINT(-68.83 -32.89)");
    }

    #[test]
    fn test_round_trip() {
        let ewkt = encode_point(Point::new(-68.83, -32.89));
        let wkt = ewkt.strip_prefix(SRID_PREFIX).unwrap();

        let (lat, lng) = decode_point(wkt);
        assert!((lat.unwrap() - (-32.89)).abs() < 1e-9);
        assert!((lng.unwrap() - (-68.83)).abs() < 1e-9);
    }

    #[test]
    fn test_decode_rejects_non_point_text() {
        // hex WKB, as the store returns for geography columns by default
        assert_eq!(
            decode_point("0101000020E6100000295C8FC2F5345..."),
            (None, None)
        );
        assert_eq!(decode_point(""), (None, None));
        assert_eq!(decode_point("LINESTRING(0 0, 1 1)"), (None, None));
        // truncated point text without the trailing parenthesis
        assert_eq!(decode_point("POINT(-68.83 -32.89"), (None, None));
    }

    #[test]
    fn test_decode_is_lenient_per_token() {
        let (lat, lng) = decode_point("POINT(abc -32.89)");
        assert_eq!(lng, None);
        assert_eq!(lat, Some(-32.89));

        let (lat, lng) = decode_point("POINT(-68.83)");
        assert_eq!(lng, Some(-68.83));
        assert_eq!(lat, None);
    }
}
