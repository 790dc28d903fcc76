//! Prediction service client owning the submission lifecycle.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::ServiceSettings;
use crate::http_client;

use super::{PredictError, PredictionOutcome, PredictionRequest, parse_prediction_response};

/// Maximum accepted size of a predict response body.
pub const MAX_RESPONSE_BYTES: usize = 256 * 1024;

/// Client for the predict endpoint.
///
/// At most one submission is in flight per client at any time. The guard is
/// instance state rather than a process-wide flag so independent clients
/// (and tests) do not interfere with each other.
pub struct PredictionClient {
    agent: ureq::Agent,
    predict_url: String,
    in_flight: AtomicBool,
}

impl PredictionClient {
    /// Build a client for the configured service.
    pub fn new(settings: &ServiceSettings) -> Self {
        let base = settings.base_url.trim_end_matches('/');
        Self {
            agent: http_client::build_agent(settings),
            predict_url: format!("{base}/api/predict"),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Submit one prediction request.
    ///
    /// Returns `None` without touching the network when another submission
    /// is already in flight; the first exchange is never cancelled. The
    /// in-flight guard is released on every exit path, including unwinds,
    /// so a failed submission can always be retried manually.
    pub fn submit(
        &self,
        request: &PredictionRequest,
    ) -> Option<Result<PredictionOutcome, PredictError>> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!("Prediction already in flight; ignoring submit");
            return None;
        }
        let _reset = InFlightReset {
            flag: &self.in_flight,
        };
        Some(self.exchange(request))
    }

    fn exchange(&self, request: &PredictionRequest) -> Result<PredictionOutcome, PredictError> {
        let response = match self
            .agent
            .post(&self.predict_url)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json")
            .send_json(request)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = http_client::read_limited_text(response, MAX_RESPONSE_BYTES)
                    .unwrap_or_else(|err| err);
                tracing::warn!("Predict endpoint returned HTTP {status}");
                return Err(PredictError::Server { status, body });
            }
            Err(ureq::Error::Transport(err)) => {
                tracing::warn!("Predict request failed in transport: {err}");
                return Err(PredictError::Transport(err.to_string()));
            }
        };

        let body = http_client::read_limited_text(response, MAX_RESPONSE_BYTES)
            .map_err(PredictError::MalformedResponse)?;
        parse_prediction_response(&body)
    }
}

/// Clears the in-flight flag when the submission settles, however it exits.
struct InFlightReset<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightReset<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RiskLevel, sample_request};
    use crate::http_client::test_support::serve_once;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::panic::AssertUnwindSafe;
    use std::sync::atomic::AtomicUsize;
    use std::sync::{Arc, mpsc};
    use std::thread;
    use std::time::{Duration, Instant};

    fn client_for(url: &str) -> PredictionClient {
        let mut settings = ServiceSettings::default();
        settings.base_url = url.to_string();
        PredictionClient::new(&settings)
    }

    fn json_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        )
    }

    const SUCCESS_BODY: &str = r#"{"success":true,"risk_probability":0.82,"risk_level":"HIGH","feature_importance":[{"feature":"Daily_Usage_Hours","importance":0.41}],"recommendations":[]}"#;

    #[test]
    fn submit_parses_successful_exchange() {
        let url = serve_once(json_response(SUCCESS_BODY));
        let client = client_for(&url);
        let outcome = client.submit(&sample_request()).unwrap().unwrap();
        assert_eq!(outcome.risk_probability, 0.82);
        assert_eq!(outcome.risk_level, RiskLevel::High);
        assert!(!client.is_submitting());
    }

    #[test]
    fn server_error_carries_status_and_body() {
        let body = "model unavailable";
        let url = serve_once(format!(
            "HTTP/1.1 500 Internal Server Error\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        ));
        let client = client_for(&url);
        let err = client.submit(&sample_request()).unwrap().unwrap_err();
        match err {
            PredictError::Server { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "model unavailable");
            }
            other => panic!("expected server error, got {other:?}"),
        }
        assert!(!client.is_submitting());
    }

    #[test]
    fn non_json_success_body_is_malformed() {
        let url = serve_once(json_response("definitely not json"));
        let client = client_for(&url);
        let err = client.submit(&sample_request()).unwrap().unwrap_err();
        assert!(matches!(err, PredictError::MalformedResponse(_)));
        assert!(!client.is_submitting());
    }

    #[test]
    fn connection_refused_is_transport_and_releases_guard() {
        // Bind then drop to get a port nothing listens on.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let client = client_for(&format!("http://{addr}"));
        let err = client.submit(&sample_request()).unwrap().unwrap_err();
        assert!(matches!(err, PredictError::Transport(_)));
        assert!(!client.is_submitting());
    }

    #[test]
    fn second_submit_while_in_flight_is_a_no_op() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let server_hits = Arc::clone(&hits);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                server_hits.fetch_add(1, Ordering::SeqCst);
                let mut buf = [0u8; 8192];
                let _ = stream.read(&mut buf);
                // Hold the first response until the test releases it.
                if release_rx.recv().is_err() {
                    break;
                }
                let _ = stream.write_all(json_response(SUCCESS_BODY).as_bytes());
            }
        });

        let client = Arc::new(client_for(&format!("http://{addr}")));
        let worker = {
            let client = Arc::clone(&client);
            thread::spawn(move || client.submit(&sample_request()))
        };

        let deadline = Instant::now() + Duration::from_secs(5);
        while !client.is_submitting() {
            assert!(Instant::now() < deadline, "first submit never started");
            thread::sleep(Duration::from_millis(1));
        }

        assert!(client.submit(&sample_request()).is_none());

        release_tx.send(()).unwrap();
        let first = worker.join().unwrap();
        assert!(first.unwrap().is_ok());
        assert!(!client.is_submitting());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn guard_resets_even_when_the_exchange_panics() {
        let flag = AtomicBool::new(true);
        let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
            let _reset = InFlightReset { flag: &flag };
            panic!("unexpected fault");
        }));
        assert!(result.is_err());
        assert!(!flag.load(Ordering::SeqCst));
    }
}
