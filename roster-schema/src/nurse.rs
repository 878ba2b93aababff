//! Nurse record schema.
//!
//! Every mutable field is free-form text. Scalars are accepted on input and stored as
//! their textual form; `null` or a missing key clears the field.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// The four caller-controlled fields of a nurse record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseFields {
    #[serde(default, deserialize_with = "deserialize_text_lax")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_text_lax")]
    pub license_number: Option<String>,

    #[serde(default, deserialize_with = "deserialize_text_lax")]
    pub dob: Option<String>,

    #[serde(default, deserialize_with = "deserialize_text_lax")]
    pub age: Option<String>,
}

impl NurseFields {
    pub fn new(
        name: impl Into<String>,
        license_number: impl Into<String>,
        dob: impl Into<String>,
        age: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            license_number: Some(license_number.into()),
            dob: Some(dob.into()),
            age: Some(age.into()),
        }
    }
}

/// A stored nurse record.
///
/// Serialized with the identifier under both `_id` and `id`, so grid front ends can key
/// rows on `id` without remapping. Deserialization reads `_id` and ignores `id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NurseRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
}

impl NurseRecord {
    pub fn from_fields(id: impl Into<String>, fields: NurseFields) -> Self {
        let NurseFields {
            name,
            license_number,
            dob,
            age,
        } = fields;
        Self {
            id: id.into(),
            name,
            license_number,
            dob,
            age,
        }
    }
}

impl Serialize for NurseRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("NurseRecord", 6)?;
        s.serialize_field("_id", &self.id)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("licenseNumber", &self.license_number)?;
        s.serialize_field("dob", &self.dob)?;
        s.serialize_field("age", &self.age)?;
        s.serialize_field("id", &self.id)?;
        s.end()
    }
}

fn deserialize_text_lax<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "Cast to string failed for value {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_fields_are_stored_as_text() {
        let fields: NurseFields = serde_json::from_value(json!({
            "name": "Jane Doe",
            "licenseNumber": 12345,
            "dob": null,
            "age": 34.5,
            "extra": "ignored"
        }))
        .unwrap();

        assert_eq!(fields.name.as_deref(), Some("Jane Doe"));
        assert_eq!(fields.license_number.as_deref(), Some("12345"));
        assert_eq!(fields.dob, None);
        assert_eq!(fields.age.as_deref(), Some("34.5"));
    }

    #[test]
    fn missing_fields_default_to_none() {
        let fields: NurseFields = serde_json::from_value(json!({})).unwrap();
        assert_eq!(fields, NurseFields::default());
    }

    #[test]
    fn structured_values_are_rejected() {
        let err = serde_json::from_value::<NurseFields>(json!({ "age": { "years": 34 } }))
            .unwrap_err();
        assert!(err.to_string().contains("Cast to string failed"));

        assert!(serde_json::from_value::<NurseFields>(json!({ "name": ["a"] })).is_err());
    }

    #[test]
    fn record_exposes_identifier_under_both_keys() {
        let record = NurseRecord::from_fields(
            "5d0c3c1e-8f52-4c39-bb5f-2b8a8d2b8e11",
            NurseFields {
                name: Some("Jane Doe".to_string()),
                ..Default::default()
            },
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "_id": "5d0c3c1e-8f52-4c39-bb5f-2b8a8d2b8e11",
                "id": "5d0c3c1e-8f52-4c39-bb5f-2b8a8d2b8e11",
                "name": "Jane Doe",
                "licenseNumber": null,
                "dob": null,
                "age": null
            })
        );

        let parsed: NurseRecord = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, record);
    }
}
