use crate::errors::ExtractionError;

pub const BEGIN_MARKER: &str = "BEGIN:VCALENDAR";
pub const END_MARKER: &str = "END:VCALENDAR";

/// Returns the span from the first begin marker through the first end marker
/// that follows it, both markers included, without touching the bytes.
pub fn extract_calendar(text: &str) -> Result<&str, ExtractionError> {
    let start = text.find(BEGIN_MARKER).ok_or(ExtractionError::MissingBegin)?;
    let body_start = start + BEGIN_MARKER.len();
    let end = text[body_start..]
        .find(END_MARKER)
        .map(|offset| body_start + offset + END_MARKER.len())
        .ok_or(ExtractionError::MissingEnd)?;
    Ok(&text[start..end])
}
