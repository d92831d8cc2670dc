use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Request body for both `/register` and `/login`.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Username and password that passed the presence check.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl TryFrom<CredentialsRequest> for Credentials {
    type Error = ValidationError;

    fn try_from(req: CredentialsRequest) -> Result<Self, Self::Error> {
        // Usernames are stored exactly as sent; only absence is rejected.
        let username = req
            .username
            .filter(|u| !u.is_empty())
            .ok_or(ValidationError::Missing("username"))?;
        // An empty password is still a password.
        let password = req.password.ok_or(ValidationError::Missing("password"))?;
        Ok(Self { username, password })
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub auth: bool,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_is_kept_verbatim() {
        let creds = Credentials::try_from(CredentialsRequest {
            username: Some(" kim ".into()),
            password: Some(" pw ".into()),
        })
        .unwrap();
        assert_eq!(creds.username, " kim ");
        assert_eq!(creds.password, " pw ");
    }

    #[test]
    fn empty_password_is_accepted_but_absent_is_not() {
        let creds = Credentials::try_from(CredentialsRequest {
            username: Some("kim".into()),
            password: Some(String::new()),
        })
        .unwrap();
        assert!(creds.password.is_empty());

        let err = Credentials::try_from(CredentialsRequest {
            username: Some("kim".into()),
            password: None,
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::Missing("password")));
    }

    #[test]
    fn empty_username_is_missing() {
        let err = Credentials::try_from(CredentialsRequest {
            username: Some(String::new()),
            password: Some("pw".into()),
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::Missing("username")));
    }
}
