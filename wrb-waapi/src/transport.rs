//! WAAPI transports.
//!
//! WAAPI accepts a single JSON object per call,
//! `{"uri": ..., "args": {...}, "options": {...}}`, posted to `/waapi`.

use std::time::Duration;

use serde_json::{json, Value};

use crate::error::WaapiError;

pub const DEFAULT_WAAPI_URL: &str = "http://127.0.0.1:8090/waapi";
pub const WAAPI_URL_ENV: &str = "WRB_WAAPI_URL";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// One remote procedure call against the authoring tool.
pub trait RpcTransport {
    fn call(&self, uri: &str, args: Value, options: Value) -> Result<Value, WaapiError>;
}

impl<T: RpcTransport + ?Sized> RpcTransport for &T {
    fn call(&self, uri: &str, args: Value, options: Value) -> Result<Value, WaapiError> {
        (**self).call(uri, args, options)
    }
}

/// Blocking HTTP transport.
#[derive(Clone)]
pub struct HttpTransport {
    url: String,
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout(CALL_TIMEOUT)
            .build();
        Self {
            url: url.into(),
            agent,
        }
    }

    /// Transport for `WRB_WAAPI_URL`, or the local default endpoint.
    pub fn from_env() -> Self {
        let url = std::env::var(WAAPI_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_WAAPI_URL.to_string());
        Self::new(url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RpcTransport for HttpTransport {
    fn call(&self, uri: &str, args: Value, options: Value) -> Result<Value, WaapiError> {
        let body = json!({ "uri": uri, "args": args, "options": options });
        tracing::debug!("waapi -> {uri}: {body}");

        match self.agent.post(&self.url).send_json(body) {
            Ok(response) => {
                let value: Value =
                    response
                        .into_json()
                        .map_err(|e| WaapiError::UnexpectedResponse {
                            uri: uri.to_string(),
                            detail: e.to_string(),
                        })?;
                tracing::debug!("waapi <- {uri}: {value}");
                Ok(value)
            }
            Err(ureq::Error::Status(code, response)) => {
                let text = response.into_string().unwrap_or_default();
                let message = serde_json::from_str::<Value>(&text)
                    .ok()
                    .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                    .unwrap_or_else(|| format!("HTTP {code}"));
                Err(WaapiError::Call {
                    uri: uri.to_string(),
                    message,
                })
            }
            Err(ureq::Error::Transport(t)) => Err(WaapiError::Connection {
                url: self.url.clone(),
                detail: t.to_string(),
            }),
        }
    }
}
