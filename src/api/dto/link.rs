//! DTOs for link creation.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

use crate::domain::entities::Link;

/// Request body of `POST /`.
///
/// Field names match case-insensitively and `null` or absent fields stay
/// empty, so `{}` is a valid request for an empty destination. An `id` sent
/// by the client is accepted for compatibility and ignored; the server always
/// assigns a fresh one.
#[derive(Debug, Default, Validate)]
pub struct CreateLinkRequest {
    /// The URL to redirect to.
    #[validate(custom(function = "validate_header_safe"))]
    pub destination: String,

    pub id: Option<String>,
}

impl<'de> Deserialize<'de> for CreateLinkRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(CreateLinkRequestVisitor)
    }
}

struct CreateLinkRequestVisitor;

impl<'de> Visitor<'de> for CreateLinkRequestVisitor {
    type Value = CreateLinkRequest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object with a destination")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(CreateLinkRequest::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut request = CreateLinkRequest::default();

        // Repeated keys: the last one wins.
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("destination") {
                if let Some(destination) = map.next_value::<Option<String>>()? {
                    request.destination = destination;
                }
            } else if key.eq_ignore_ascii_case("id") {
                if let Some(id) = map.next_value::<Option<String>>()? {
                    request.id = Some(id);
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        Ok(request)
    }
}

/// Response body of `POST /`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateLinkResponse {
    pub id: String,
    pub destination: String,
}

impl From<Link> for CreateLinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            destination: link.destination,
        }
    }
}

/// Rejects destinations that cannot be sent back in a `Location` header.
fn validate_header_safe(destination: &str) -> Result<(), ValidationError> {
    if destination.chars().any(|c| c.is_control()) {
        let mut err = ValidationError::new("control_characters");
        err.message = Some("must not contain control characters".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(destination: &str) -> CreateLinkRequest {
        CreateLinkRequest {
            destination: destination.to_string(),
            id: None,
        }
    }

    fn decode(body: &str) -> Result<CreateLinkRequest, serde_json::Error> {
        serde_json::from_str(body)
    }

    #[test]
    fn test_valid_destination() {
        assert!(request("https://example.com/path?q=1").validate().is_ok());
    }

    #[test]
    fn test_empty_and_long_destinations_accepted() {
        assert!(request("").validate().is_ok());

        let long = format!("https://example.com/{}", "a".repeat(3000));
        assert!(request(&long).validate().is_ok());
    }

    #[test]
    fn test_control_characters_rejected() {
        assert!(
            request("https://example.com/\r\nSet-Cookie: x=1")
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_client_id_is_parsed_but_optional() {
        let with_id = decode(r#"{"id":"mine","destination":"https://example.com"}"#).unwrap();
        assert_eq!(with_id.id.as_deref(), Some("mine"));

        let without_id = decode(r#"{"destination":"https://example.com"}"#).unwrap();
        assert!(without_id.id.is_none());
    }

    #[test]
    fn test_missing_or_null_destination_decodes_empty() {
        assert_eq!(decode("{}").unwrap().destination, "");
        assert_eq!(decode(r#"{"destination":null}"#).unwrap().destination, "");
        assert_eq!(decode("null").unwrap().destination, "");
    }

    #[test]
    fn test_field_names_match_case_insensitively() {
        let req = decode(r#"{"Destination":"https://example.com","ID":"x"}"#).unwrap();
        assert_eq!(req.destination, "https://example.com");
        assert_eq!(req.id.as_deref(), Some("x"));
    }

    #[test]
    fn test_last_repeated_key_wins() {
        let req = decode(r#"{"destination":"https://a.example","DESTINATION":"https://b.example"}"#)
            .unwrap();
        assert_eq!(req.destination, "https://b.example");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let req = decode(r#"{"destination":"https://example.com","extra":[1,{"a":2}]}"#).unwrap();
        assert_eq!(req.destination, "https://example.com");
    }

    #[test]
    fn test_wrong_types_rejected() {
        assert!(decode(r#"{"destination":42}"#).is_err());
        assert!(decode(r#"["https://example.com"]"#).is_err());
        assert!(decode(r#""https://example.com""#).is_err());
    }
}
