use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Business profile as stored by the document store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BusinessRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Relative URL of the derivative image, e.g. `/uploads/1700000000000.webp`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Unsaved business record handed to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBusiness {
    pub name: String,
    pub description: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub image: Option<String>,
}

impl NewBusiness {
    /// Attach the store-assigned identity.
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> BusinessRecord {
        BusinessRecord {
            id,
            name: self.name,
            description: self.description,
            email: self.email,
            phone: self.phone,
            address: self.address,
            image: self.image,
            created_at,
        }
    }
}

/// Text fields of a registration submission.
///
/// Absent fields deserialize to empty strings so that presence is checked in
/// one place by `validate()`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, Validate)]
pub struct CreateBusinessRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
}

impl CreateBusinessRequest {
    /// Set a text field by its form name. Returns false for unknown names.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "name" => &mut self.name,
            "description" => &mut self.description,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            _ => return false,
        };
        *slot = value;
        true
    }

    pub fn into_new_business(self, image: Option<String>) -> NewBusiness {
        NewBusiness {
            name: self.name,
            description: self.description,
            email: self.email,
            phone: self.phone,
            address: self.address,
            image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_request() -> CreateBusinessRequest {
        CreateBusinessRequest {
            name: "Test Business".to_string(),
            description: "Test Description".to_string(),
            email: "test@example.com".to_string(),
            phone: "0123456789".to_string(),
            address: "Test Address".to_string(),
        }
    }

    #[test]
    fn test_complete_request_validates() {
        assert!(complete_request().validate().is_ok());
    }

    #[test]
    fn test_each_missing_field_fails_validation() {
        for field in ["name", "description", "email", "phone", "address"] {
            let mut request = complete_request();
            assert!(request.set_field(field, String::new()));
            let errors = request.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key(field),
                "expected {field} to be reported"
            );
        }
    }

    #[test]
    fn test_set_field_ignores_unknown_names() {
        let mut request = CreateBusinessRequest::default();
        assert!(!request.set_field("website", "example.com".to_string()));
        assert!(request.set_field("email", "a@b.c".to_string()));
        assert_eq!(request.email, "a@b.c");
    }

    #[test]
    fn test_json_with_missing_field_deserializes_to_empty() {
        let request: CreateBusinessRequest =
            serde_json::from_str(r#"{"description":"d","email":"e","phone":"p","address":"a"}"#)
                .unwrap();
        assert!(request.name.is_empty());
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_record_without_image_omits_field() {
        let record = complete_request()
            .into_new_business(None)
            .into_record(Uuid::new_v4(), Utc::now());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Test Business");
        assert!(json.get("image").is_none());
        assert!(json.get("id").is_some());
    }
}
