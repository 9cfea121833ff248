//! 리뷰 레코드 대상 스키마(provider별 표현).

use serde_json::{Map, Value, json};

use crate::domain::review::{ProductQuality, RECORD_FIELDS, Sentiment};

/// OpenAI json_schema 이름 / Anthropic tool 이름.
pub(super) const SCHEMA_NAME: &str = "review_record";
pub(super) const SCHEMA_DESCRIPTION: &str =
    "Record the sentiment, intensity, quality, price and category extracted from a product review.";

const OPTIONAL_FIELD: &str = "price";

/// JSON Schema 변형.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SchemaDialect {
    /// OpenAI strict 모드: 모든 필드 required, 선택 필드는 null 허용.
    Strict,
    /// Anthropic tool input: 선택 필드는 required에서 제외.
    ToolInput,
}

fn enum_values(field: &str) -> Option<Vec<&'static str>> {
    match field {
        "sentiment" => Some(Sentiment::ALL.iter().map(|v| v.as_str()).collect()),
        "quality" => Some(ProductQuality::ALL.iter().map(|v| v.as_str()).collect()),
        _ => None,
    }
}

/// 표준 JSON Schema 객체를 만든다.
pub(super) fn record_json_schema(dialect: SchemaDialect) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in RECORD_FIELDS {
        let optional = field.name == OPTIONAL_FIELD;
        let mut property = json!({ "description": field.description });

        property["type"] = if optional && dialect == SchemaDialect::Strict {
            json!(["string", "null"])
        } else {
            json!("string")
        };
        if let Some(values) = enum_values(field.name) {
            property["enum"] = json!(values);
        }

        properties.insert(field.name.to_string(), property);
        if !optional || dialect == SchemaDialect::Strict {
            required.push(field.name);
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Gemini responseSchema(OpenAPI 부분집합) 객체를 만든다.
pub(super) fn gemini_response_schema() -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in RECORD_FIELDS {
        let mut property = json!({
            "type": "STRING",
            "description": field.description
        });
        if let Some(values) = enum_values(field.name) {
            property["format"] = json!("enum");
            property["enum"] = json!(values);
        }
        if field.name == OPTIONAL_FIELD {
            property["nullable"] = json!(true);
        } else {
            required.push(field.name);
        }
        properties.insert(field.name.to_string(), property);
    }

    let ordering: Vec<&str> = RECORD_FIELDS.iter().map(|f| f.name).collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
        "propertyOrdering": ordering
    })
}
