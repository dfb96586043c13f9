//! Blocking client for the two external services the visualizer consumes:
//! the graph source (`GET /api/graph`) and the pathfinding compute service
//! (`POST /api/path`). Responses pass through the sanitizer before the
//! trace model parses them; callers receive ready-to-use models or a
//! `DriverError`, never a partial result.

use std::fmt::{self, Display};
use std::time::Duration;

use route_graph::{sanitize, Algorithm, Graph, GraphError, PathResult, TraceError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3001";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Enum representing the errors a service call can produce.
///
/// The possible errors are:
///
/// - `Transport`: the request never completed (connection refused, timeout,
///   invalid response body encoding).
/// - `Status`: the service answered with a non-2xx status.
/// - `Graph`: the graph payload violated the graph model's contract.
/// - `Trace`: the trace payload violated the trace model's contract.
///
/// All of these are recoverable by retrying the user action.
#[derive(Debug)]
pub enum DriverError {
    Transport(String),
    Status(u16),
    Graph(GraphError),
    Trace(TraceError),
}

impl Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Transport(detail) => {
                write!(f, "[Transport]: The request could not complete: {}", detail)
            }
            DriverError::Status(code) => {
                write!(f, "[Status]: The service answered with HTTP {}", code)
            }
            DriverError::Graph(e) => write!(f, "{}", e),
            DriverError::Trace(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<GraphError> for DriverError {
    fn from(e: GraphError) -> Self {
        DriverError::Graph(e)
    }
}

impl From<TraceError> for DriverError {
    fn from(e: TraceError) -> Self {
        DriverError::Trace(e)
    }
}

impl From<reqwest::Error> for DriverError {
    fn from(e: reqwest::Error) -> Self {
        DriverError::Transport(e.to_string())
    }
}

/// Client bound to one backend base URL.
///
/// Calls block the current thread; the graphical interface runs them on
/// worker threads and collects results over a channel.
pub struct BackendDriver {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BackendDriver {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the complete airway graph. Any failure means the graph is
    /// unavailable; there is no partial graph.
    pub fn fetch_graph(&self) -> Result<Graph, DriverError> {
        let url = format!("{}/api/graph", self.base_url);
        let response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(DriverError::Status(response.status().as_u16()));
        }
        let body = response.text()?;
        Ok(Graph::from_json(&body)?)
    }

    /// Submits a pathfinding request and parses the returned trace. The raw
    /// body is sanitized first: the compute service marks unreached
    /// distances with a token that is not valid JSON.
    pub fn find_path(
        &self,
        start: &str,
        end: &str,
        algorithm: Algorithm,
    ) -> Result<PathResult, DriverError> {
        let url = format!("{}/api/path", self.base_url);
        let body = serde_json::json!({
            "start": start,
            "end": end,
            "algorithm": algorithm.as_str(),
        });
        let response = self.client.post(url).json(&body).send()?;
        if !response.status().is_success() {
            return Err(DriverError::Status(response.status().as_u16()));
        }
        let raw = response.text()?;
        Ok(PathResult::from_json(&sanitize(&raw))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_keep_their_detail() {
        let graph_err: DriverError = GraphError::InvalidJson("eof".to_string()).into();
        assert!(graph_err.to_string().contains("InvalidJson"));

        let trace_err: DriverError = TraceError::EmptySteps.into();
        assert!(trace_err.to_string().contains("EmptySteps"));
    }

    #[test]
    fn status_errors_carry_the_code() {
        assert_eq!(
            DriverError::Status(502).to_string(),
            "[Status]: The service answered with HTTP 502"
        );
    }

    #[test]
    fn refused_connection_is_a_transport_error() {
        // nothing listens on this port
        let driver = BackendDriver::new("http://127.0.0.1:1");
        match driver.fetch_graph() {
            Err(DriverError::Transport(_)) => {}
            other => panic!("expected a transport error, got {:?}", other.map(|_| ())),
        }
    }
}
