use crate::models::{Credentials, Signup};

#[tracing::instrument(skip(password))]
pub fn validate_signup(
    username: String,
    password: String,
    email: String,
    name: String,
) -> Result<Signup, String> {
    Signup::default()
        .set_username(username)?
        .set_password(password)?
        .set_email(email)?
        .set_name(name)
}

#[tracing::instrument(skip(password))]
pub fn validate_login(username: String, password: String) -> Result<Credentials, String> {
    let username = username.trim().to_string();
    if username.is_empty() || password.is_empty() {
        return Err("All fields are required".into());
    }
    Ok(Credentials { username, password })
}
