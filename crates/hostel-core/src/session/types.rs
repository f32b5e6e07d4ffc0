use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the serialized [`Identity`].
pub const IDENTITY_KEY: &str = "user";

/// Account role attached to an identity.
///
/// The backend sends upper-case names (`ADMIN`) while identities written by
/// older clients hold lower-case ones (`admin`), so parsing ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    Resident,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Resident => "resident",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "resident" => Ok(Role::Resident),
            "staff" => Ok(Role::Staff),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Decoded identity of the signed-in user, persisted next to the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub logged_in: bool,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Identity {
    pub fn signed_in(role: Role, name: Option<String>, email: Option<String>) -> Self {
        Self {
            logged_in: true,
            role,
            name,
            email,
        }
    }

    /// Name shown in prompts and `whoami` output.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("unknown user")
    }
}

/// Bearer token paired with the identity it was issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct Credential {
    pub token: String,
    pub identity: Identity,
}

/// Body of `POST auth/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email_or_username: String,
    pub password: String,
}

/// `data` payload returned by a successful login.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub resident_id: Option<u64>,
}

impl AuthResponse {
    pub fn into_credential(self) -> Credential {
        Credential {
            token: self.token,
            identity: Identity::signed_in(self.role, self.name, self.email),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_any_case() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Staff ".parse::<Role>().unwrap(), Role::Staff);
        assert!("guest".parse::<Role>().is_err());
    }

    #[test]
    fn test_identity_reads_legacy_lower_case_role() {
        let identity: Identity =
            serde_json::from_str(r#"{"loggedIn":true,"role":"admin","name":"Warden"}"#).unwrap();
        assert!(identity.logged_in);
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.display_name(), "Warden");
    }

    #[test]
    fn test_identity_serializes_camel_case() {
        let identity = Identity::signed_in(Role::Staff, None, Some("s@hostel.lk".to_string()));
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["loggedIn"], true);
        assert_eq!(json["role"], "staff");
        assert!(json.get("name").is_none());
    }

    #[test]
    fn test_auth_response_into_credential() {
        let response: AuthResponse = serde_json::from_str(
            r#"{"token":"abc","email":"a@b.c","name":"Admin","role":"ADMIN","residentId":null}"#,
        )
        .unwrap();
        let credential = response.into_credential();
        assert_eq!(credential.token, "abc");
        assert_eq!(credential.identity.role, Role::Admin);
        assert!(credential.identity.logged_in);
    }
}
