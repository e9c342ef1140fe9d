use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    #[default]
    Input,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FormField {
    pub name: Option<String>,
    #[serde(default)]
    pub kind: FieldKind,
    pub value: String,
}
impl FormField {
    pub fn input(name: impl ToString, value: impl ToString) -> Self {
        Self { name: Some(name.to_string()), kind: FieldKind::Input, value: value.to_string() }
    }
    pub fn submit(value: impl ToString) -> Self {
        Self { name: None, kind: FieldKind::Submit, value: value.to_string() }
    }
}

/// Ordered form fields awaiting submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Form {
    pub fields: Vec<FormField>,
}

impl FromIterator<FormField> for Form {
    fn from_iter<I: IntoIterator<Item = FormField>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

impl Form {
    /// Collect non-submit fields into a submission body keyed by field name.
    ///
    /// A field without a name is reported and skipped. A form whose every
    /// field is a submit control carries no body at all.
    pub fn collect(&self) -> Option<Value> {
        if self.fields.iter().all(|field| field.kind == FieldKind::Submit) {
            return None;
        }

        let mut submission = Map::new();
        for (i, field) in self.fields.iter().enumerate() {
            if field.kind == FieldKind::Submit {
                continue;
            }
            match &field.name {
                Some(name) => {
                    submission.insert(name.clone(), Value::String(field.value.clone()));
                }
                None => tracing::error!("form field {i} [{:?}] has no name", field.kind),
            }
        }
        Some(Value::Object(submission))
    }
}
