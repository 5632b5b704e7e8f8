//! Exposition content types and Accept header negotiation.
//!
//! The exporter speaks the Prometheus text format 0.0.4 by default and
//! OpenMetrics 1.0.0 when a client asks for it. Negotiation is a pure
//! mapping from the raw Accept header value; anything unrecognized falls
//! back to the text format.

/// Media type served when no alternate format is negotiated.
pub const TEXT_FORMAT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Media type for the OpenMetrics exposition variant.
pub const OPENMETRICS_CONTENT_TYPE: &str =
    "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// Supported output encodings for one scrape document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Prometheus text format 0.0.4 (the default).
    TextFormat,
    /// OpenMetrics 1.0.0.
    OpenMetrics,
}

impl ContentType {
    /// Full `Content-Type` header value for this encoding.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::TextFormat => TEXT_FORMAT_CONTENT_TYPE,
            ContentType::OpenMetrics => OPENMETRICS_CONTENT_TYPE,
        }
    }
}

/// Resolves the output encoding from a raw Accept header value.
///
/// An absent header, an empty value, `*/*` or anything unrecognized selects
/// the text format. Any comma-separated element whose media type starts
/// with `application/openmetrics-text` selects OpenMetrics.
pub fn negotiate(accept: Option<&str>) -> ContentType {
    let Some(accept) = accept else {
        return ContentType::TextFormat;
    };

    for element in accept.split(',') {
        if element.trim().starts_with("application/openmetrics-text") {
            return ContentType::OpenMetrics;
        }
    }

    ContentType::TextFormat
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_header_yields_text_format() {
        assert_eq!(negotiate(None), ContentType::TextFormat);
    }

    #[test]
    fn test_empty_and_wildcard_yield_text_format() {
        assert_eq!(negotiate(Some("")), ContentType::TextFormat);
        assert_eq!(negotiate(Some("*/*")), ContentType::TextFormat);
    }

    #[test]
    fn test_unrecognized_yields_text_format() {
        assert_eq!(negotiate(Some("text/html")), ContentType::TextFormat);
        assert_eq!(
            negotiate(Some("application/json, text/plain")),
            ContentType::TextFormat
        );
    }

    #[test]
    fn test_openmetrics_exact_match() {
        assert_eq!(
            negotiate(Some("application/openmetrics-text")),
            ContentType::OpenMetrics
        );
    }

    #[test]
    fn test_openmetrics_with_parameters() {
        assert_eq!(
            negotiate(Some("application/openmetrics-text; version=1.0.0; charset=utf-8")),
            ContentType::OpenMetrics
        );
    }

    #[test]
    fn test_openmetrics_in_list() {
        assert_eq!(
            negotiate(Some("text/html, application/openmetrics-text;q=0.9")),
            ContentType::OpenMetrics
        );
    }
}
