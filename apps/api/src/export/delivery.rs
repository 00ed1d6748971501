use axum::{
    body::Body,
    http::{
        header::{CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE, USER_AGENT},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::warn;

use crate::document::FileFormat;

/// User-Agent fragments that mark a mobile runtime. Matched case-insensitively.
const MOBILE_AGENTS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Client {
    /// Saved through a transient object URL; the response must not be cached.
    Mobile,
    Desktop,
}

pub fn detect_client(headers: &HeaderMap) -> Client {
    let agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if MOBILE_AGENTS.iter().any(|needle| agent.contains(needle)) {
        Client::Mobile
    } else {
        Client::Desktop
    }
}

/// Wraps an exported document in a download response.
///
/// Non-ASCII file names are sent as an RFC 6266 `filename*` next to an ASCII
/// `filename`. A name the header cannot carry at all is delivered `inline`, so
/// the document still opens in a viewer.
pub fn deliver(
    headers: &HeaderMap,
    format: FileFormat,
    file_name: &str,
    body: impl Into<Bytes>,
) -> Response {
    let client = detect_client(headers);

    let disposition = match HeaderValue::from_str(&attachment(file_name)) {
        Ok(value) => value,
        Err(e) => {
            warn!(file_name, error = %e, "Attachment header rejected; delivering inline");
            HeaderValue::from_static("inline")
        }
    };

    let mut response = (StatusCode::OK, Body::from(body.into())).into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(CONTENT_TYPE, HeaderValue::from_static(format.content_type()));
    response_headers.insert(CONTENT_DISPOSITION, disposition);
    if client == Client::Mobile {
        response_headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    response
}

fn attachment(file_name: &str) -> String {
    if file_name.is_ascii() {
        return format!("attachment; filename=\"{file_name}\"");
    }

    let fallback: String = file_name
        .chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control() && !matches!(c, '"' | '\\'))
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        urlencoding::encode(file_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_agent(agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(agent).unwrap());
        headers
    }

    // ── detect_client ──

    #[test]
    fn test_detects_mobile_agents() {
        let agents = [
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36",
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)",
            "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X)",
            "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)",
            "Mozilla/5.0 (compatible; MSIE 10.0; Windows Phone 8.0; IEMobile/10.0)",
        ];
        for agent in agents {
            assert_eq!(detect_client(&with_agent(agent)), Client::Mobile, "{agent}");
        }
    }

    #[test]
    fn test_desktop_and_missing_agent() {
        let desktop = with_agent("Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/128.0");
        assert_eq!(detect_client(&desktop), Client::Desktop);
        assert_eq!(detect_client(&HeaderMap::new()), Client::Desktop);
    }

    // ── deliver ──

    #[test]
    fn test_desktop_gets_plain_attachment() {
        let response = deliver(&HeaderMap::new(), FileFormat::Pdf, "Jane_Resume.pdf", b"%PDF-".to_vec());
        let headers = response.headers();
        assert_eq!(headers[CONTENT_TYPE], "application/pdf");
        assert_eq!(headers[CONTENT_DISPOSITION], "attachment; filename=\"Jane_Resume.pdf\"");
        assert!(headers.get(CACHE_CONTROL).is_none());
    }

    #[test]
    fn test_mobile_gets_no_store() {
        let response = deliver(
            &with_agent("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)"),
            FileFormat::Doc,
            "Jane_Resume.doc",
            "<html></html>".to_string(),
        );
        let headers = response.headers();
        assert_eq!(headers[CONTENT_TYPE], "application/msword");
        assert_eq!(headers[CACHE_CONTROL], "no-store");
    }

    #[test]
    fn test_non_ascii_name_uses_encoded_filename() {
        let response = deliver(&HeaderMap::new(), FileFormat::Pdf, "José_Resume.pdf", Vec::new());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[CONTENT_DISPOSITION],
            "attachment; filename=\"Jos_Resume.pdf\"; filename*=UTF-8''Jos%C3%A9_Resume.pdf"
        );
    }

    #[test]
    fn test_unencodable_name_falls_back_to_inline() {
        let response = deliver(&HeaderMap::new(), FileFormat::Pdf, "Jane\nDoe_Resume.pdf", Vec::new());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_DISPOSITION], "inline");
        assert_eq!(response.headers()[CONTENT_TYPE], "application/pdf");
    }
}
