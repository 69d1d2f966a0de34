//! # wrb-waapi
//!
//! Remote Query Adapter for the Wwise Authoring API.
//!
//! [`AuthoringTool`] is the narrow capability surface the bridge needs:
//! capture the selection, resolve original source files, import rendered
//! audio. [`WaapiClient`] implements it on top of any [`RpcTransport`];
//! [`HttpTransport`] talks to a running Wwise over WAAPI's HTTP endpoint.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{AuthoringTool, KeyField, SourceField, WaapiClient};
pub use error::WaapiError;
pub use transport::{HttpTransport, RpcTransport, DEFAULT_WAAPI_URL, WAAPI_URL_ENV};
