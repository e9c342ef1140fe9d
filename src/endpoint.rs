use std::{marker::PhantomData, sync::Arc};

use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http_body::Body;
use http_body_util::BodyExt;
use mime::APPLICATION_JSON;
use serde_json::Value;
use tower::{Service, ServiceExt};

use crate::{
    error::{CallError, RenderError},
    form::Form,
    interface::{
        config::{CallOverride, ContainerSpec, EndpointConfig, Mode, ResolvedCall},
        page::Page,
        template::Template,
    },
    payload::Payload,
};

/// One endpoint bound to one render target.
///
/// The lifecycle of [`Endpoint::call`]:
/// + the `on_call` hook fires
/// + the endpoint is hit and the JSON response parsed
/// + the response is passed through the `on_receive` hook for reshaping
/// + each record is rendered through the named template and appended to the
///   container region (a non-append container is cleared once, first)
/// + the `on_render` hook fires per record
///
/// Invocation is fire-and-forget: every failure is logged and, for call
/// failures, optionally rendered through the error template. Nothing is
/// returned to the caller.
pub struct Endpoint<S, ResB, P> {
    config: EndpointConfig,
    client: S,
    page: Arc<P>,
    phantom: PhantomData<ResB>,
}

impl<S: Clone, ResB, P> Clone for Endpoint<S, ResB, P> {
    fn clone(&self) -> Self {
        // derive(Clone) would demand ResB: Clone through the phantom
        Self { config: self.config.clone(), client: self.client.clone(), page: self.page.clone(), phantom: PhantomData }
    }
}
impl<S, ResB, P> std::fmt::Debug for Endpoint<S, ResB, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint").field("config", &self.config).finish_non_exhaustive()
    }
}

impl<S, ResB, P> Endpoint<S, ResB, P>
where
    // the binding spawns nothing, so the transport future need not be Send
    S: Service<http::Request<Bytes>, Response = http::Response<ResB>> + Clone,
    S::Error: std::error::Error + Send + Sync + 'static,
    ResB: Body,
    ResB::Error: std::error::Error + Send + Sync + 'static,
    P: Page,
{
    pub fn new(config: EndpointConfig, client: S, page: Arc<P>) -> Self {
        if config.container.is_none() {
            tracing::warn!("container reference none for '{}{}' [{}]", config.host, config.path, *config.method);
        }
        if !config.path.starts_with('/') {
            tracing::warn!("path '{}' does not start with '/'", config.path);
        }
        Self { config, client, page, phantom: PhantomData }
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Invoke the endpoint. `submission` must be present for POST/PUT/PATCH
    /// and absent for GET; `overrides` adjusts path, container and hooks for
    /// this call only.
    pub async fn call(&self, submission: Option<Value>, overrides: Option<CallOverride>) {
        let resolved = self.config.resolve(overrides.as_ref());
        tracing::debug!("call {} [{}]", resolved.uri(), resolved.method);

        if let Some(on_call) = &resolved.hooks.on_call {
            on_call(&resolved);
        }

        match self.api_call(&resolved, submission.as_ref()).await {
            Ok(received) => {
                let received = match &resolved.hooks.on_receive {
                    Some(transform) => transform(received),
                    None => received,
                };
                let payload = Payload::from(received);

                self.render_payload(&resolved, &payload);

                if let Some(on_render) = &resolved.hooks.on_render {
                    for record in payload.records() {
                        on_render(record);
                    }
                }
            }
            Err(error) => {
                tracing::error!("{} ({}): {}", error.summary(), error.uri(), error);
                self.apply_error_template(&error);
            }
        }
    }

    /// Collect `form` into a submission body and delegate to [`Self::call`].
    pub async fn submit_form(&self, form: &Form, overrides: Option<CallOverride>) {
        let submission = form.collect();
        tracing::debug!("submit {}{} {:?}", self.config.host, self.config.path, submission);
        self.call(submission, overrides).await
    }

    /// The network phase: validate the submission against the method, hit
    /// the endpoint, parse the response as JSON.
    async fn api_call(&self, resolved: &ResolvedCall, data: Option<&Value>) -> Result<Value, CallError> {
        let (uri, method) = (resolved.uri(), resolved.method.clone());

        let data_method = [http::Method::POST, http::Method::PUT, http::Method::PATCH].contains(&method);
        if data_method && data.is_none() {
            tracing::warn!("{method} to '{uri}' with no data");
            return Err(CallError::NoData { uri });
        }
        if method == http::Method::GET && data.is_some() {
            tracing::warn!("{method} to '{uri}' with data");
            return Err(CallError::UnexpectedData { uri, method });
        }

        let body = data.map(|value| Bytes::from(value.to_string())).unwrap_or_default();
        let request = http::Request::builder()
            .method(method)
            .uri(uri.as_str())
            .header(CONTENT_TYPE, APPLICATION_JSON.as_ref())
            .body(body)
            .map_err(|e| CallError::Connection { uri: uri.clone(), source: e.into() })?;

        let response = self
            .client
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| CallError::Connection { uri: uri.clone(), source: e.into() })?;

        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| CallError::Parse { uri: uri.clone(), source: e.into() })?
            .to_bytes();
        serde_json::from_slice(&bytes).map_err(|e| CallError::Parse { uri, source: e.into() })
    }

    fn render_payload(&self, resolved: &ResolvedCall, payload: &Payload) {
        let Some(container) = &resolved.container else {
            tracing::warn!("{}{} container not specified", self.config.host, self.config.path);
            return;
        };

        if container.mode != Mode::Append && !self.page.replace(&container.id, "") {
            tracing::error!("{} {} could not find '{}'", self.config.host, self.config.path, container.id);
        }

        for record in payload.records() {
            if let Err(error) = self.render_into(resolved.template.as_deref(), container, record) {
                tracing::error!("{} {} {}", self.config.host, self.config.path, error);
            }
        }
    }

    /// Render one record through the named template and append the fragment.
    /// The append happens regardless of container mode.
    fn render_into(
        &self,
        template_id: Option<&str>,
        container: &ContainerSpec,
        record: &Value,
    ) -> Result<(), RenderError> {
        let template_id = template_id.ok_or(RenderError::NoTemplate)?;
        let source = self.page.read(template_id).ok_or_else(|| RenderError::MissingTemplate(template_id.to_string()))?;
        let template: Template = source.parse()?;
        let rendered = template.render(record);
        self.page
            .append(&container.id, &rendered)
            .then_some(())
            .ok_or_else(|| RenderError::MissingContainer(container.id.clone()))
    }

    /// Call failures render `{summary, detail}` through the error template
    /// into the base container; overrides do not apply here.
    fn apply_error_template(&self, error: &CallError) {
        let Some(template_id) = self.config.error_template.as_deref() else { return };
        let Some(container) = self.config.container_spec() else {
            tracing::warn!("{}{} container not specified", self.config.host, self.config.path);
            return;
        };
        let record = serde_json::json!({"summary": error.summary(), "detail": error.to_string()});
        if let Err(e) = self.render_into(Some(template_id), &container, &record) {
            tracing::error!("{} {} {}", self.config.host, self.config.path, e);
        }
    }
}
