use serde::{Deserialize, Serialize};

use super::{Post, UserId};

const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=20;
const NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=50;
const PASSWORD_MIN_LENGTH: usize = 6;

static EMAIL_REGEX: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
static USERNAME_REGEX: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

fn validate_email(email: &str) -> bool {
    EMAIL_REGEX
        .get_or_init(|| {
            regex::Regex::new(r"^[\w\-\.+]+@([\w-]+\.)+\w{2,}$").expect("static email pattern")
        })
        .is_match(email)
}

fn validate_username(username: &str) -> bool {
    USERNAME_REGEX
        .get_or_init(|| regex::Regex::new(r"^[a-zA-Z0-9_]+$").expect("static username pattern"))
        .is_match(username)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Author {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl Author {
    #[inline]
    pub fn name(&self) -> String {
        self.name
            .clone()
            .filter(|x| !x.is_empty())
            .unwrap_or_else(|| "Not set".to_string())
    }

    #[inline]
    pub fn email(&self) -> String {
        self.email
            .clone()
            .filter(|x| !x.is_empty())
            .unwrap_or_else(|| "Not set".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Signup {
    username: String,
    password: String,
    email: String,
    name: String,
}

impl Signup {
    pub fn set_username(mut self, username: String) -> Result<Self, String> {
        let username = username.trim();
        if username.is_empty() {
            return Err("Username cannot be empty".into());
        }
        if !USERNAME_LENGTH.contains(&username.chars().count()) {
            return Err(format!(
                "Username must be {}-{} characters",
                USERNAME_LENGTH.start(),
                USERNAME_LENGTH.end()
            ));
        }
        if !validate_username(username) {
            return Err("Username may only contain letters, numbers and underscores".into());
        }
        self.username = username.to_string();
        Ok(self)
    }

    pub fn set_password(mut self, password: String) -> Result<Self, String> {
        if password.is_empty() {
            return Err("Password cannot be empty".into());
        }
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(format!(
                "Password must be at least {PASSWORD_MIN_LENGTH} characters"
            ));
        }
        self.password = password;
        Ok(self)
    }

    pub fn set_email(mut self, email: String) -> Result<Self, String> {
        let email = email.trim().to_lowercase();
        if !validate_email(&email) {
            return Err(format!(
                "The email {email} is invalid, provide a correct one"
            ));
        }
        self.email = email;
        Ok(self)
    }

    pub fn set_name(mut self, name: String) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Name cannot be empty".into());
        }
        if !NAME_LENGTH.contains(&name.chars().count()) {
            return Err(format!(
                "Name must be {}-{} characters",
                NAME_LENGTH.start(),
                NAME_LENGTH.end()
            ));
        }
        self.name = name.to_string();
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_password: Option<String>,
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ProfileUpdate {
    /// Blank fields are left out of the request; the password pair is only
    /// sent when a new password was typed.
    #[tracing::instrument(skip(new_password, current_password))]
    pub fn from_form(
        username: String,
        email: String,
        name: String,
        new_password: String,
        current_password: String,
    ) -> Result<Self, String> {
        let email = non_empty(email);
        if let Some(email) = email.as_deref() {
            if !validate_email(email) {
                return Err(format!(
                    "The email {email} is invalid, provide a correct one"
                ));
            }
        }

        let (new_password, current_password) = match new_password.is_empty() {
            true => (None, None),
            false if current_password.is_empty() => {
                return Err("Enter your current password to set a new one".into());
            }
            false => (Some(new_password), Some(current_password)),
        };

        let update = Self {
            username: non_empty(username),
            email,
            name: non_empty(name),
            new_password,
            current_password,
        };

        if update == Self::default() {
            return Err("Nothing to update".into());
        }
        Ok(update)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdated {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub requires_relogin: bool,
}
