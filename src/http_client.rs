//! HTTP agent construction and bounded body reading.
//!
//! Every exchange with the prediction service is a single best-effort
//! attempt: timeouts are bounded here, and there is deliberately no retry
//! or backoff layer.

use std::io::Read;
use std::time::Duration;

use crate::config::ServiceSettings;

/// Build an HTTP agent with the configured timeouts.
pub(crate) fn build_agent(settings: &ServiceSettings) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_secs(settings.connect_timeout_secs))
        .timeout_read(Duration::from_secs(settings.exchange_timeout_secs))
        .timeout_write(Duration::from_secs(settings.exchange_timeout_secs))
        .build()
}

/// Read a response body as UTF-8 text, refusing anything over `max_bytes`.
///
/// A declared `Content-Length` over the cap fails before any body byte is
/// read; bodies without a declared length are capped while streaming.
pub(crate) fn read_limited_text(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<String, String> {
    if let Some(declared) = declared_length(&response) {
        if declared > max_bytes as u64 {
            return Err(format!("Response too large: {declared} bytes"));
        }
    }

    let mut body = Vec::with_capacity(4096);
    let mut reader = response.into_reader();
    let mut chunk = [0u8; 8192];
    loop {
        let read = reader.read(&mut chunk).map_err(|err| err.to_string())?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
        if body.len() > max_bytes {
            return Err(format!("Response exceeded {max_bytes} bytes"));
        }
    }

    String::from_utf8(body).map_err(|err| err.to_string())
}

fn declared_length(response: &ureq::Response) -> Option<u64> {
    response.header("Content-Length")?.parse().ok()
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_support::serve_once;

    fn fetch(raw_response: String) -> ureq::Response {
        let url = serve_once(raw_response);
        build_agent(&ServiceSettings::default())
            .get(&url)
            .call()
            .unwrap()
    }

    #[test]
    fn declared_length_over_cap_fails_before_reading() {
        let response = fetch("HTTP/1.1 200 OK\r\nContent-Length: 4096\r\n\r\nok".to_string());
        let err = read_limited_text(response, 64).unwrap_err();
        assert!(err.contains("too large"));
    }

    #[test]
    fn undeclared_body_is_capped_while_streaming() {
        let body = "x".repeat(100);
        let response = fetch(format!("HTTP/1.0 200 OK\r\n\r\n{body}"));
        let err = read_limited_text(response, 64).unwrap_err();
        assert!(err.contains("exceeded"));
    }

    #[test]
    fn body_under_cap_comes_back_as_text() {
        let response = fetch("HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello".to_string());
        assert_eq!(read_limited_text(response, 64).unwrap(), "hello");
    }
}
