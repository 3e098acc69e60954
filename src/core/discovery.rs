use crate::utils::error::{BridgeError, Result};
use serde_json::Value;
use std::time::Duration;

pub const BRIDGE_HOST: &str = "127.0.0.1";
pub const BRIDGE_PORTS: [u16; 4] = [3131, 3132, 3133, 3134];

/// Seconds to wait for an LLM response when the caller does not say.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Grace added on top of the logical timeout so the sidecar can time out
/// first and report its own error.
pub const TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Probe the candidate ports in order and return the first one whose
/// `/health` endpoint answers with `ok: true`. Unreachable ports, bad
/// JSON, and unhealthy responses all fall through to the next candidate.
pub async fn discover_port(host: &str, ports: &[u16]) -> Result<u16> {
    let client = reqwest::Client::new();

    for &port in ports {
        let url = format!("http://{}:{}/health", host, port);
        tracing::debug!("Probing bridge at {}", url);

        let response = match client.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Port {} unreachable: {}", port, e);
                continue;
            }
        };

        match response.json::<Value>().await {
            Ok(body) if body.get("ok").and_then(Value::as_bool) == Some(true) => {
                tracing::info!("Found bridge on port {}", port);
                return Ok(port);
            }
            Ok(_) => tracing::debug!("Port {} answered but is not healthy", port),
            Err(e) => tracing::debug!("Port {} returned invalid JSON: {}", port, e),
        }
    }

    Err(BridgeError::DiscoveryError {
        host: host.to_string(),
        ports: ports.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_discover_finds_healthy_port() {
        let server = MockServer::start();
        let health_mock = server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"ok": true, "version": "1.2.0"}));
        });

        let port = discover_port("127.0.0.1", &[server.port()]).await.unwrap();

        health_mock.assert();
        assert_eq!(port, server.port());
    }

    #[tokio::test]
    async fn test_discover_skips_dead_port() {
        // Bind and drop a listener to get a port with nothing behind it.
        let dead_port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"ok": true}));
        });

        let port = discover_port("127.0.0.1", &[dead_port, server.port()])
            .await
            .unwrap();

        assert_eq!(port, server.port());
    }

    #[tokio::test]
    async fn test_discover_skips_unhealthy_response() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/health");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"ok": false}));
        });

        let result = discover_port("127.0.0.1", &[server.port()]).await;

        match result {
            Err(BridgeError::DiscoveryError { ports, .. }) => {
                assert_eq!(ports, vec![server.port()]);
            }
            other => panic!("Expected DiscoveryError, got {:?}", other),
        }
    }
}
