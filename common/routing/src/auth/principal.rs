use error_stack::Report;

#[derive(Debug, thiserror::Error)]
#[error("failed to look up the principal of a token")]
pub struct PrincipalLookupError;

/// Resolves the `id` of verified claims to the account it belongs to.
pub trait PrincipalStore: Clone + Send + Sync + 'static {
    type Principal: Clone + Send + Sync + 'static;

    /// `None` when the account no longer exists.
    fn principal(
        &self,
        id: String,
    ) -> impl Future<Output = Result<Option<Self::Principal>, Report<PrincipalLookupError>>> + Send;
}
