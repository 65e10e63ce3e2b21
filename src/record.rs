use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{ApiError, Result};

/// Character record returned by the `people` resource.
///
/// Fields absent from the body or set to `null` are left empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Person {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hair_color: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub eye_color: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub height: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Person {
    /// Parses a response body that must be a JSON object.
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body).map_err(|err| {
            ApiError::Decode(format!("invalid person JSON: {err}; body: {body}"))
        })?;
        if !value.is_object() {
            return Err(ApiError::Decode(format!(
                "invalid person JSON: expected an object; body: {body}"
            )));
        }
        Person::deserialize(value).map_err(|err| {
            ApiError::Decode(format!("invalid person JSON: {err}; body: {body}"))
        })
    }

    /// Fields in print order: name, hair color, eye color, height.
    pub fn fields(&self) -> [&str; 4] {
        [
            self.name.as_str(),
            self.hair_color.as_str(),
            self.eye_color.as_str(),
            self.height.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::Person;
    use crate::ApiError;

    #[test]
    fn parses_the_four_fields_and_ignores_the_rest() {
        let body = r#"{
            "name": "Luke Skywalker",
            "height": "172",
            "mass": "77",
            "hair_color": "blond",
            "eye_color": "blue",
            "films": ["https://swapi.dev/api/films/1/"]
        }"#;

        let person = Person::from_json(body).expect("body must parse");

        assert_eq!(person.fields(), ["Luke Skywalker", "blond", "blue", "172"]);
    }

    #[test]
    fn missing_fields_are_empty() {
        let person = Person::from_json(r#"{"title": "A New Hope"}"#).expect("body must parse");
        assert_eq!(person, Person::default());
    }

    #[test]
    fn null_fields_are_empty() {
        let person = Person::from_json(r#"{"name": null, "height": "172"}"#).expect("body must parse");
        assert_eq!(person.fields(), ["", "", "", "172"]);
    }

    #[test]
    fn top_level_arrays_are_decode_errors() {
        for body in ["[]", r#"["Luke","blond","blue","172"]"#] {
            let err = Person::from_json(body).expect_err("array must be rejected");
            assert!(matches!(err, ApiError::Decode(_)), "{body}");
        }
    }

    #[test]
    fn scalar_documents_are_decode_errors() {
        for body in ["null", "\"Luke\"", "172"] {
            let err = Person::from_json(body).expect_err("scalar must be rejected");
            assert!(matches!(err, ApiError::Decode(_)), "{body}");
        }
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = Person::from_json("{\"name\": ").expect_err("must fail");
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn wrongly_typed_field_is_a_decode_error() {
        let err = Person::from_json(r#"{"name": "Luke", "height": 172}"#).expect_err("must fail");
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
