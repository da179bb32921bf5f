use crate::domain::repository::Authenticator;
use crate::domain::types::SignUpOutcome;
use crate::error::LinkServiceError;

pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Create an account with the identity provider. No code is issued here; the
/// user logs in afterwards to obtain one.
pub struct SignUpUseCase<A: Authenticator> {
    pub authenticator: A,
}

impl<A: Authenticator> SignUpUseCase<A> {
    pub async fn execute(&self, input: SignUpInput) -> Result<SignUpOutcome, LinkServiceError> {
        let email = input.email.trim();
        if email.is_empty() {
            return Err(LinkServiceError::InvalidSignup("email is required".to_owned()));
        }
        if !email.contains('@') {
            return Err(LinkServiceError::InvalidSignup("email is invalid".to_owned()));
        }
        if input.password.is_empty() {
            return Err(LinkServiceError::InvalidSignup(
                "password is required".to_owned(),
            ));
        }

        let outcome = self.authenticator.sign_up(email, &input.password).await?;
        tracing::info!(
            user_id = %outcome.user_id,
            confirmation_required = outcome.confirmation_required,
            "account created"
        );
        Ok(outcome)
    }
}
