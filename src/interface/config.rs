use std::{fmt::Debug, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::helper::{coalesce::Coalesce, http_serde_priv, is_default::IsDefault};

/// Fixed association of one API call shape with one render target.
///
/// Immutable after construction. The hook slots are not part of the serde
/// representation, they are attached in code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct EndpointConfig {
    pub host: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "IsDefault::is_default")]
    pub method: http_serde_priv::Method,
    #[serde(default, skip_serializing_if = "IsDefault::is_default")]
    pub container: Option<ContainerRef>,
    #[serde(default, skip_serializing_if = "IsDefault::is_default")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "IsDefault::is_default")]
    pub error_template: Option<String>,
    #[serde(skip)]
    pub hooks: Hooks,
}

/// Container reference as written in configuration: either a bare region id,
/// which implies [`Mode::Append`], or a full spec with an explicit mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContainerRef {
    Id(String),
    Spec(ContainerSpec),
}
impl ContainerRef {
    pub fn spec(&self) -> ContainerSpec {
        match self {
            Self::Id(id) => ContainerSpec { id: id.clone(), mode: Mode::default() },
            Self::Spec(spec) => spec.clone(),
        }
    }
}
impl From<&str> for ContainerRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}
impl From<String> for ContainerRef {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}
impl From<ContainerSpec> for ContainerRef {
    fn from(spec: ContainerSpec) -> Self {
        Self::Spec(spec)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ContainerSpec {
    pub id: String,
    #[serde(default, skip_serializing_if = "IsDefault::is_default")]
    pub mode: Mode,
}

/// Whether rendered fragments extend the region or start it over.
/// Rewrite clears the region once per invocation, before the first render;
/// every render appends after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Append,
    Rewrite,
}

/// Per-invocation partial override, merged over the base configuration.
/// Lives for one call.
#[derive(Debug, Clone, Default)]
pub struct CallOverride {
    pub path: Option<String>,
    pub container: Option<ContainerOverride>,
    pub hooks: Hooks,
}

/// The container override only takes effect when it names an id; a mode on
/// its own is ignored. An id without a mode keeps the base mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ContainerOverride {
    #[serde(default, skip_serializing_if = "IsDefault::is_default")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "IsDefault::is_default")]
    pub mode: Option<Mode>,
}

impl Coalesce<ContainerOverride> for ContainerSpec {
    // inverse direction to the usual coalesce: present override fields win
    fn coalesce(self, other: &ContainerOverride) -> Self {
        Self { id: other.id.clone().unwrap_or(self.id), mode: other.mode.unwrap_or(self.mode) }
    }
}

pub type CallHook = Arc<dyn Fn(&ResolvedCall) + Send + Sync>;
pub type TransformHook = Arc<dyn Fn(Value) -> Value + Send + Sync>;
pub type RecordHook = Arc<dyn Fn(&Value) + Send + Sync>;

/// Optional lifecycle handler slots, resolved once per invocation by
/// override-then-base fallback.
///
/// + `on_call`: before the request, receives the resolved call, side effect only
/// + `on_receive`: after the response parses, its return value replaces the
///   payload for every later step
/// + `on_render`: after rendering, once per record of the payload
#[derive(Clone, Default)]
pub struct Hooks {
    pub on_call: Option<CallHook>,
    pub on_receive: Option<TransformHook>,
    pub on_render: Option<RecordHook>,
}
impl Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_call", &self.on_call.is_some())
            .field("on_receive", &self.on_receive.is_some())
            .field("on_render", &self.on_render.is_some())
            .finish()
    }
}
impl Coalesce for Hooks {
    fn coalesce(self, other: &Self) -> Self {
        Self {
            on_call: self.on_call.coalesce(&other.on_call),
            on_receive: self.on_receive.coalesce(&other.on_receive),
            on_render: self.on_render.coalesce(&other.on_render),
        }
    }
}
impl Hooks {
    pub fn on_call(hook: impl Fn(&ResolvedCall) + Send + Sync + 'static) -> Self {
        Self { on_call: Some(Arc::new(hook)), ..Default::default() }
    }
    pub fn on_receive(hook: impl Fn(Value) -> Value + Send + Sync + 'static) -> Self {
        Self { on_receive: Some(Arc::new(hook)), ..Default::default() }
    }
    pub fn on_render(hook: impl Fn(&Value) + Send + Sync + 'static) -> Self {
        Self { on_render: Some(Arc::new(hook)), ..Default::default() }
    }
}

/// Fully resolved effective configuration for one invocation.
#[derive(Debug, Clone)]
pub struct ResolvedCall {
    pub host: String,
    pub path: String,
    pub method: http::Method,
    pub container: Option<ContainerSpec>,
    pub template: Option<String>,
    pub error_template: Option<String>,
    pub hooks: Hooks,
}
impl ResolvedCall {
    pub fn uri(&self) -> String {
        format!("{}{}", self.host, self.path)
    }
}

impl EndpointConfig {
    pub fn container_spec(&self) -> Option<ContainerSpec> {
        self.container.as_ref().map(ContainerRef::spec)
    }

    /// Merge an optional override over this configuration, field by field.
    pub fn resolve(&self, overrides: Option<&CallOverride>) -> ResolvedCall {
        let path = overrides.and_then(|o| o.path.clone()).unwrap_or_else(|| self.path.clone());
        let container = match overrides.and_then(|o| o.container.as_ref()) {
            Some(o) if o.id.is_some() => Some(self.container_spec().unwrap_or_default().coalesce(o)),
            _ => self.container_spec(),
        };
        let hooks = overrides.map(|o| o.hooks.clone()).unwrap_or_default().coalesce(&self.hooks);
        ResolvedCall {
            host: self.host.clone(),
            path,
            method: (*self.method).clone(),
            container,
            template: self.template.clone(),
            error_template: self.error_template.clone(),
            hooks,
        }
    }
}
