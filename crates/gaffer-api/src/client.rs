// Analysis service client.
//
// Posts an `AnalyseRequest` to `{base_url}/analyse` and decodes the
// `TacticalReport` reply. One attempt per call: no timeout, retry or
// backoff. Error bodies of the form `{"detail": "..."}` are surfaced
// verbatim; anything else collapses to the HTTP status.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use gaffer_core::report::TacticalReport;
use gaffer_core::request::AnalyseRequest;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("Analysis failed. Is the backend running? ({0})")]
    Transport(String),

    /// Non-success status with a string `detail` in the body.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    /// Non-success status without a usable `detail`.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// 2xx response whose body is not a usable report.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Build the error for a non-success response from its raw body.
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    match parse_error_detail(body) {
        Some(detail) => ApiError::Rejected { status, detail },
        None => ApiError::Status { status },
    }
}

/// Extract a string `detail` field from a JSON error body.
///
/// Validation errors carry `detail` as an array of objects; those, and
/// bodies that are not JSON at all, yield `None`.
pub fn parse_error_detail(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    v.get("detail")?.as_str().map(|s| s.to_string())
}

/// Reject reports that are missing the fields every view depends on.
pub fn validate_report(report: &TacticalReport) -> Result<(), ApiError> {
    let required = [
        ("team_name", &report.team_name),
        ("opponent_name", &report.opponent_name),
        ("recommended_formation", &report.recommended_formation),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ApiError::Malformed(format!("`{field}` is empty")));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// AnalysisService
// ---------------------------------------------------------------------------

/// The remote analysis engine as seen by the controller.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyse(&self, request: &AnalyseRequest) -> Result<TacticalReport, ApiError>;

    /// Liveness probe. `Ok(())` when the service reports itself healthy.
    async fn health(&self) -> Result<(), ApiError>;
}

// ---------------------------------------------------------------------------
// AnalysisClient
// ---------------------------------------------------------------------------

/// reqwest-backed [`AnalysisService`].
pub struct AnalysisClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8000`).
    /// A trailing slash is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn analyse(&self, request: &AnalyseRequest) -> Result<TacticalReport, ApiError> {
        let url = self.endpoint("/analyse");
        info!(tier = %request.tier, "requesting analysis from {}", url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            let err = error_from_body(status.as_u16(), &body);
            warn!(status = status.as_u16(), "analysis rejected: {}", err);
            return Err(err);
        }

        let report: TacticalReport =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        validate_report(&report)?;

        debug!(
            formation = %report.recommended_formation,
            starters = report.starting_xi.len(),
            bench = report.bench.len(),
            "analysis received"
        );
        Ok(report)
    }

    async fn health(&self) -> Result<(), ApiError> {
        let url = self.endpoint("/health");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !status.is_success() {
            return Err(error_from_body(status.as_u16(), &body));
        }

        let v: Value =
            serde_json::from_str(&body).map_err(|e| ApiError::Malformed(e.to_string()))?;
        match v.get("status").and_then(|s| s.as_str()) {
            Some("ok") => Ok(()),
            other => Err(ApiError::Malformed(format!(
                "unexpected health status {:?}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use gaffer_core::player::Player;
    use gaffer_core::position::SpecificPosition;
    use gaffer_core::request::{MatchResult, Tier1Data};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const REPORT_JSON: &str = r#"{
        "team_name": "Rovers FC",
        "opponent_name": "City Athletic",
        "tier_used": "tier_1",
        "recommended_formation": "4-4-2",
        "press_intensity": "Medium",
        "defensive_line": "Deep",
        "tactical_focus": "Stay compact",
        "match_risk_level": "Medium",
        "rotation_suggestions": [],
        "win_probability": 0.41,
        "draw_probability": 0.3,
        "loss_probability": 0.29,
        "offensive_strength_index": 0.5,
        "defensive_vulnerability_index": 0.4,
        "fatigue_risk_score": 0.2,
        "tactical_stability_score": 0.7,
        "reasoning": "Balanced.",
        "starting_xi": [],
        "bench": []
    }"#;

    fn request() -> AnalyseRequest {
        AnalyseRequest::tier1(Tier1Data {
            team_name: "Rovers FC".into(),
            opponent_name: "City Athletic".into(),
            last_5_results: vec![MatchResult::Win; 5],
            goals_scored_last_5: 9,
            goals_conceded_last_5: 5,
            players: vec![Player::new("Sam Keeper", SpecificPosition::GK)],
            opponent_last_5_results: None,
            opponent_goals_scored: None,
            opponent_goals_conceded: None,
        })
    }

    /// Read one full HTTP request (headers plus `Content-Length` body).
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
                continue;
            };
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            let content_length = head
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Serve a single canned response and hand back the raw request seen.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let raw = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.flush().await.unwrap();
            let _ = socket.shutdown().await;
            raw
        });
        (format!("http://{addr}"), handle)
    }

    #[tokio::test]
    async fn analyse_success_posts_json_and_decodes_report() {
        let (base, server) = serve_once("200 OK", REPORT_JSON).await;
        let client = AnalysisClient::new(format!("{base}/"));
        let report = client.analyse(&request()).await.unwrap();
        assert_eq!(report.recommended_formation, "4-4-2");
        assert_eq!(report.win_probability, Some(0.41));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /analyse HTTP/1.1"), "request line: {raw}");
        let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["tier"], "tier_1");
        assert_eq!(sent["tier1_data"]["players"][0]["specific_position"], "GK");
    }

    #[tokio::test]
    async fn analyse_error_detail_is_shown_verbatim() {
        let (base, server) =
            serve_once("503 Service Unavailable", r#"{"detail":"model unavailable"}"#).await;
        let err = AnalysisClient::new(base).analyse(&request()).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 503,
                detail: "model unavailable".into()
            }
        );
        assert_eq!(err.to_string(), "model unavailable");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn analyse_error_without_json_falls_back_to_status() {
        let (base, server) = serve_once("502 Bad Gateway", "<html>bad gateway</html>").await;
        let err = AnalysisClient::new(base).analyse(&request()).await.unwrap_err();
        assert_eq!(err, ApiError::Status { status: 502 });
        assert_eq!(err.to_string(), "HTTP 502");
        server.await.unwrap();
    }

    #[tokio::test]
    async fn validation_detail_array_falls_back_to_status() {
        let (base, server) = serve_once(
            "422 Unprocessable Entity",
            r#"{"detail":[{"loc":["body","tier"],"msg":"field required"}]}"#,
        )
        .await;
        let err = AnalysisClient::new(base).analyse(&request()).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP 422");
        assert_eq!(err.status(), Some(422));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn garbage_success_body_is_malformed() {
        let (base, server) = serve_once("200 OK", "not json").await;
        let err = AnalysisClient::new(base).analyse(&request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn blank_formation_is_malformed() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"team_name":"A","opponent_name":"B","recommended_formation":"  "}"#,
        )
        .await;
        let err = AnalysisClient::new(base).analyse(&request()).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Malformed("`recommended_formation` is empty".into())
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Bind then drop to get a port nobody is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = AnalysisClient::new(format!("http://{addr}"))
            .analyse(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("Analysis failed. Is the backend running?"));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn health_ok() {
        let (base, server) = serve_once("200 OK", r#"{"status":"ok"}"#).await;
        AnalysisClient::new(base).health().await.unwrap();
        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /health HTTP/1.1"));
    }

    #[tokio::test]
    async fn health_unexpected_status_is_malformed() {
        let (base, server) = serve_once("200 OK", r#"{"status":"degraded"}"#).await;
        let err = AnalysisClient::new(base).health().await.unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
        server.await.unwrap();
    }

    #[test]
    fn parse_error_detail_shapes() {
        assert_eq!(parse_error_detail(r#"{"detail":"nope"}"#), Some("nope".into()));
        assert_eq!(parse_error_detail(r#"{"detail":null}"#), None);
        assert_eq!(parse_error_detail(r#"{"message":"x"}"#), None);
        assert_eq!(parse_error_detail(""), None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        assert_eq!(AnalysisClient::new("http://localhost:8000/").base_url(), "http://localhost:8000");
    }
}
