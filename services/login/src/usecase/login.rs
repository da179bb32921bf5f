use crate::domain::presentation::LoginView;
use crate::domain::repository::{Authenticator, CodeGenerator, OtcRepository};
use crate::error::LinkServiceError;
use crate::usecase::otc::IssueOtcUseCase;

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<A, R, G>
where
    A: Authenticator,
    R: OtcRepository,
    G: CodeGenerator,
{
    pub authenticator: A,
    pub issuer: IssueOtcUseCase<R, G>,
}

impl<A, R, G> LoginUseCase<A, R, G>
where
    A: Authenticator,
    R: OtcRepository,
    G: CodeGenerator,
{
    /// Authenticate, then issue a linking code. Fail-fast and strictly ordered:
    /// the issuer never runs unless sign-in succeeded.
    pub async fn execute(&self, input: LoginInput) -> Result<LoginView, LinkServiceError> {
        // 1. Sign in with the identity provider
        let identity = self
            .authenticator
            .sign_in(input.email.trim(), &input.password)
            .await?;

        // 2. Mint and persist a code bound to the identity
        let binding = self.issuer.execute(identity.user_id).await?;

        // 3. Only a persisted binding is shown
        Ok(LoginView::showing(&binding))
    }
}
