use std::{convert::Infallible, str::FromStr};

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_while1},
    character::complete::multispace0,
    combinator::map_res,
    multi::many0,
    sequence::delimited,
    IResult,
};
use serde_json::Value;

use crate::error::TemplateError;

/// Logic-less template: literal text interleaved with `{{field}}` tags.
///
/// A tag is substituted with the record's value for that field; a field the
/// record does not carry renders as the empty string. A literal `{` outside
/// a tag is not supported and fails the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    fragments: Vec<Fragment>,
}

impl FromStr for Template {
    type Err = TemplateError;
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self { fragments: Fragment::split(input)? })
    }
}

impl Template {
    pub fn render(&self, record: &Value) -> String {
        self.fragments.iter().map(|f| f.assign(record)).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fragment {
    Literal(String),
    Field(String),
}

impl Fragment {
    pub fn split(input: &str) -> Result<Vec<Self>, TemplateError> {
        let (remain, parsed) = Self::parse(input).map_err(|e| TemplateError::NomParseError(e.to_string()))?;
        remain.is_empty().then_some(parsed).ok_or_else(|| TemplateError::RemainingTemplate(remain.to_string()))
    }

    pub fn assign(&self, record: &Value) -> String {
        match self {
            Self::Literal(text) => text.clone(),
            Self::Field(key) => record.get(key).map(Self::display).unwrap_or_default(),
        }
    }

    fn display(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    pub fn parse_field(input: &str) -> IResult<&str, Self> {
        let identifier = take_while1(|c: char| c.is_alphanumeric() || c == '_');
        map_res(delimited(tag("{{"), delimited(multispace0, identifier, multispace0), tag("}}")), |key: &str| {
            Ok::<_, Infallible>(Self::Field(key.to_string()))
        })(input)
    }

    pub fn parse_literal(input: &str) -> IResult<&str, Self> {
        map_res(is_not("{"), |text: &str| Ok::<_, Infallible>(Self::Literal(text.to_string())))(input)
    }

    pub fn parse(input: &str) -> IResult<&str, Vec<Self>> {
        many0(alt((Self::parse_field, Self::parse_literal)))(input)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_fragments() {
        let parsed = Fragment::split("<li>{{name}}: {{ score }}</li>").unwrap();
        assert_eq!(
            parsed,
            vec![
                Fragment::Literal("<li>".to_string()),
                Fragment::Field("name".to_string()),
                Fragment::Literal(": ".to_string()),
                Fragment::Field("score".to_string()),
                Fragment::Literal("</li>".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_record() {
        let template: Template = "<li>{{name}}: {{score}}</li>".parse().unwrap();
        let rendered = template.render(&json!({"name": "ada", "score": 42}));
        assert_eq!(rendered, "<li>ada: 42</li>");
    }

    #[test]
    fn test_render_missing_field_is_empty() {
        let template: Template = "<li>{{name}}{{nickname}}</li>".parse().unwrap();
        let rendered = template.render(&json!({"name": "ada"}));
        assert_eq!(rendered, "<li>ada</li>");
    }

    #[test]
    fn test_render_null_field_is_empty() {
        let template: Template = "[{{flag}}]".parse().unwrap();
        assert_eq!(template.render(&json!({"flag": null})), "[]");
    }

    #[test]
    fn test_unterminated_tag_is_error() {
        let error = "<li>{{name</li>".parse::<Template>().unwrap_err();
        assert!(matches!(error, TemplateError::RemainingTemplate(s) if s == "{{name</li>"));
    }

    #[test]
    fn test_non_object_record_renders_fields_empty() {
        let template: Template = "<li>{{name}}</li>".parse().unwrap();
        assert_eq!(template.render(&json!("just a string")), "<li></li>");
    }
}
