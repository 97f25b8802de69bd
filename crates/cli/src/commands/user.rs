//! Account management commands.

use webify_server::services::auth::{AuthError, AuthService};

use super::{CommandError, connect};

#[derive(Debug, thiserror::Error)]
pub enum UserCommandError {
    #[error(transparent)]
    Connect(#[from] CommandError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create a password account, applying the same checks as signup.
///
/// # Errors
///
/// Returns an error if the input is rejected or the email is taken.
pub async fn create(email: &str, name: &str, password: &str) -> Result<(), UserCommandError> {
    let pool = connect().await?;

    let user = AuthService::new(&pool)
        .register_with_password(name, email, password)
        .await?;

    tracing::info!(
        "User created successfully! ID: {}, Email: {}",
        user.id,
        user.email
    );
    Ok(())
}
