//! Bind a REST endpoint to a named page region.
//!
//! An [`endpoint::Endpoint`] holds one fixed request shape (host, path,
//! method) together with one render target (template id, container id).
//! Invoking it performs the request, optionally reshapes the JSON response
//! through a hook, renders each record through a logic-less template and
//! splices the fragments into the container.
//!
//! ```
//! use std::sync::Arc;
//! use restbind::{endpoint::Endpoint, interface::{config::EndpointConfig, page::InMemoryPage}};
//!
//! # fn main() {
//! let page = Arc::new(InMemoryPage::new());
//! page.define("greeting-template", "<li>{{name}}</li>");
//! page.define("greeting-list", "");
//!
//! let config = EndpointConfig {
//!     host: "http://localhost:3000".to_string(),
//!     path: "/greetings".to_string(),
//!     container: Some("greeting-list".into()),
//!     template: Some("greeting-template".to_string()),
//!     ..Default::default()
//! };
//! let endpoint = Endpoint::new(config, restbind::client::DefaultHttpClient::new().unwrap(), page);
//! # tokio_test::block_on(async { endpoint.call(None, None).await });
//! # }
//! ```

#[cfg(feature = "default-http-client")]
pub mod client;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod interface;
pub mod payload;

pub type Result<T, E = error::BindError> = std::result::Result<T, E>;

/// Endpoint driven by the batteries-included reqwest transport.
#[cfg(feature = "default-http-client")]
pub type DefaultEndpoint<P> = endpoint::Endpoint<client::DefaultHttpClient, reqwest::Body, P>;
