use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use bytes::Bytes;
use tower::Service;

use crate::error::IntoResult;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Batteries-included transport: reqwest behind the [`tower::Service`] seam
/// the endpoint expects.
#[derive(Debug, Clone, Default)]
pub struct DefaultHttpClient {
    client: reqwest::Client,
}
impl DefaultHttpClient {
    pub fn new() -> crate::Result<Self> {
        let client = reqwest::Client::builder().user_agent(APP_USER_AGENT).build().box_err()?;
        Ok(Self { client })
    }
}

impl Service<http::Request<Bytes>> for DefaultHttpClient {
    type Response = http::Response<reqwest::Body>;
    type Error = reqwest::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.client.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<Bytes>) -> Self::Future {
        match request.try_into() {
            Ok(req) => {
                let fut = self.client.call(req);
                Box::pin(async { fut.await.map(http::Response::<reqwest::Body>::from) })
            }
            Err(e) => Box::pin(async { Err(e) }),
        }
    }
}
