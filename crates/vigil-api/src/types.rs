//! Wire types for the auth service

use serde::{Deserialize, Serialize};

/// Reply from the identity-check endpoints.
///
/// The backend reports status as the strings "true"/"false" rather than
/// JSON booleans; the id field is present only on a positive match and
/// its name depends on which endpoint answered.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityReply {
    pub status: String,
    #[serde(default)]
    pub admin_user_id: Option<String>,
    #[serde(default)]
    pub reg_user_id: Option<String>,
    #[serde(default)]
    pub unreg_user_id: Option<String>,
}

impl IdentityReply {
    pub fn is_positive(&self) -> bool {
        self.status == "true"
    }

    /// Whichever id field the backend attached.
    pub fn subject_id(&self) -> Option<&str> {
        self.admin_user_id
            .as_deref()
            .or(self.reg_user_id.as_deref())
            .or(self.unreg_user_id.as_deref())
    }
}

/// Error body shape used by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Sign-up form for a new registered user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub ic_number: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_reply_positive() {
        let reply: IdentityReply =
            serde_json::from_str(r#"{"status": "true", "admin_user_id": "a1"}"#).unwrap();

        assert!(reply.is_positive());
        assert_eq!(reply.subject_id(), Some("a1"));
    }

    #[test]
    fn test_identity_reply_negative() {
        let reply: IdentityReply = serde_json::from_str(r#"{"status": "false"}"#).unwrap();

        assert!(!reply.is_positive());
        assert_eq!(reply.subject_id(), None);
    }

    #[test]
    fn test_new_user_form_field_names() {
        let profile = NewUser {
            username: "Jo Citizen".to_string(),
            email: "jo@example.com".to_string(),
            phone: "0123456789".to_string(),
            ic_number: "990101-01-1234".to_string(),
            password: "hunter22".to_string(),
        };

        let encoded = serde_json::to_value(&profile).unwrap();
        // The backend expects camelCase form keys
        assert!(encoded.get("icNumber").is_some());
        assert!(encoded.get("ic_number").is_none());
    }
}
