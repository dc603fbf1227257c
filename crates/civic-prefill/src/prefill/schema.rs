//! Form definitions as stored with each service: a plain field list or a
//! JSON Schema object with `properties`.

use super::domain::{FieldKind, FormField};
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("form definition is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported form definition: {0}")]
    Shape(String),
}

/// Parses any accepted form definition layout into an ordered field list.
pub fn parse_form_definition(source: &str) -> Result<Vec<FormField>, SchemaError> {
    let document: Value = serde_json::from_str(source)?;
    fields_from_value(document)
}

pub fn fields_from_value(document: Value) -> Result<Vec<FormField>, SchemaError> {
    match document {
        Value::Array(_) => Ok(serde_json::from_value(document)?),
        Value::Object(mut object) => {
            if let Some(fields) = object.remove("fields") {
                if fields.is_array() {
                    return Ok(serde_json::from_value(fields)?);
                }
                return Err(SchemaError::Shape("`fields` must be an array".to_string()));
            }

            match object.remove("properties") {
                Some(Value::Object(properties)) => {
                    let required = required_ids(object.get("required"));
                    Ok(fields_from_properties(properties, &required))
                }
                Some(_) => Err(SchemaError::Shape(
                    "`properties` must be an object".to_string(),
                )),
                None => Err(SchemaError::Shape(
                    "expected a field array, `fields`, or `properties`".to_string(),
                )),
            }
        }
        other => Err(SchemaError::Shape(format!(
            "expected an array or object, found {}",
            json_kind(&other)
        ))),
    }
}

fn required_ids(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|ids| {
            ids.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn fields_from_properties(properties: Map<String, Value>, required: &[String]) -> Vec<FormField> {
    properties
        .into_iter()
        .map(|(id, property)| {
            let options = enum_options(&property);
            let kind = property_kind(&property, !options.is_empty());
            FormField {
                required: required.iter().any(|name| *name == id),
                label: property
                    .get("title")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                id,
                kind,
                options,
            }
        })
        .collect()
}

fn enum_options(property: &Value) -> Vec<String> {
    property
        .get("enum")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .map(|value| match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn property_kind(property: &Value, has_options: bool) -> FieldKind {
    if has_options {
        return FieldKind::Select;
    }

    let json_type = property.get("type").and_then(Value::as_str).unwrap_or("string");
    let format = property.get("format").and_then(Value::as_str);

    match (json_type, format) {
        ("number" | "integer", _) => FieldKind::Number,
        ("boolean", _) => FieldKind::Boolean,
        (_, Some("date")) => FieldKind::Date,
        (_, Some("email")) => FieldKind::Email,
        _ => FieldKind::Text,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_array_and_wrapped_fields() {
        let source = r#"[{"id":"nome","type":"text","required":true},{"id":"idade","type":"number"}]"#;
        let fields = parse_form_definition(source).expect("array parses");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].kind, FieldKind::Number);

        let wrapped = format!(r#"{{"type":"object","fields":{source}}}"#);
        assert_eq!(parse_form_definition(&wrapped).expect("wrapped parses"), fields);
    }

    #[test]
    fn converts_json_schema_properties_in_order() {
        let source = r#"{
            "type": "object",
            "required": ["nome", "cpf"],
            "properties": {
                "nome": { "type": "string", "title": "Nome Completo" },
                "cpf": { "type": "string", "title": "CPF" },
                "dataNascimento": { "type": "string", "format": "date" },
                "email": { "type": "string", "format": "email" },
                "estadoCivil": { "type": "string", "enum": ["Solteiro(a)", "Casado(a)"] },
                "quantidadeFilhos": { "type": "integer" },
                "possuiDeficiencia": { "type": "boolean" }
            }
        }"#;

        let fields = parse_form_definition(source).expect("schema parses");
        let ids: Vec<_> = fields.iter().map(|field| field.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "nome",
                "cpf",
                "dataNascimento",
                "email",
                "estadoCivil",
                "quantidadeFilhos",
                "possuiDeficiencia"
            ]
        );
        assert!(fields[0].required && fields[1].required && !fields[2].required);
        assert_eq!(fields[0].label.as_deref(), Some("Nome Completo"));
        assert_eq!(fields[2].kind, FieldKind::Date);
        assert_eq!(fields[3].kind, FieldKind::Email);
        assert_eq!(fields[4].kind, FieldKind::Select);
        assert_eq!(fields[4].options, vec!["Solteiro(a)", "Casado(a)"]);
        assert_eq!(fields[5].kind, FieldKind::Number);
        assert_eq!(fields[6].kind, FieldKind::Boolean);
    }

    #[test]
    fn rejects_unknown_layouts() {
        match parse_form_definition(r#"{"type":"object"}"#) {
            Err(SchemaError::Shape(_)) => {}
            other => panic!("expected shape error, got {other:?}"),
        }
        match parse_form_definition("42") {
            Err(SchemaError::Shape(message)) => assert!(message.contains("a number")),
            other => panic!("expected shape error, got {other:?}"),
        }
        assert!(matches!(
            parse_form_definition("{not json"),
            Err(SchemaError::Json(_))
        ));
    }
}
