//! 传输层：面向 Foundry 项目端点的 HTTP 传输。
//!
//! HTTP transport for the agent project endpoint. Every request carries the
//! `api-version` query parameter, an optional bearer token and a client
//! correlation id; non-success statuses become [`crate::Error::Remote`].

pub mod http;

pub use http::{HttpTransport, TransportError};
