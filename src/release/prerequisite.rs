//! Extraction of the prerequisite block embedded in release bodies

/// Marker delimiting a prerequisite block inside a release body.
pub const PREREQUISITE_MARKER: &str = "<!--upgrade-prerequisites-required-->";

/// Detects and extracts the prerequisite block from a release body.
///
/// Returns the presence flag and the text strictly between the first and last
/// occurrence of [`PREREQUISITE_MARKER`], with any remaining occurrences of the
/// marker stripped out. A body carrying the marker exactly once flags presence
/// but yields no message, since there is no closing delimiter.
pub fn extract_prerequisite(body: &str) -> (bool, String) {
    let (Some(start), Some(end)) = (
        body.find(PREREQUISITE_MARKER),
        body.rfind(PREREQUISITE_MARKER),
    ) else {
        return (false, String::new());
    };

    if start == end {
        return (true, String::new());
    }

    let inner = &body[start + PREREQUISITE_MARKER.len()..end];
    (true, inner.replace(PREREQUISITE_MARKER, ""))
}
