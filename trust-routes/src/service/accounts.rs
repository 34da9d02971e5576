use crate::error::ServiceError;
use crate::metrics;
use crate::ServiceResult;
use error_stack::{IntoReport, Report, ResultExt};
use routing::auth::{PrincipalLookupError, PrincipalStore, TokenKeys};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use trust_core::ContentEngine;
use trust_core::model::{AdminUser, EntityId};
use trust_core::repository::UserRepository;
use trust_core::validation::present;
use utoipa::ToSchema;

/// Login or registration form.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    fn require(self) -> ServiceResult<(String, String)> {
        match (present(self.username), present(self.password)) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(ServiceError::Invalid("Please provide a username and password".into())
                .into_report()),
        }
    }
}

/// A signed-in admin and the bearer token for later requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Session {
    #[serde(rename = "_id")]
    #[schema(value_type = String)]
    pub id: EntityId,
    pub username: String,
    pub token: String,
}

/// Admin accounts. Only the first account can be registered through the API.
#[derive(Clone)]
pub struct AccountService<E: ContentEngine> {
    users: E::Users,
    keys: TokenKeys,
    bcrypt_cost: u32,
}

impl<E: ContentEngine> AccountService<E> {
    pub fn new(engine: &E, keys: TokenKeys, bcrypt_cost: u32) -> Self {
        Self {
            users: engine.users(),
            keys,
            bcrypt_cost,
        }
    }

    #[instrument(skip_all, name = "service#register")]
    pub async fn register(&self, credentials: Credentials) -> ServiceResult<Session> {
        let existing = self
            .users
            .count()
            .await
            .change_context(ServiceError::Repository)?;
        if existing > 0 {
            warn!("registration attempted while {existing} admin account(s) exist");
            return Err(ServiceError::RegistrationClosed.into_report());
        }

        let (username, password) = credentials.require()?;
        let cost = self.bcrypt_cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .change_context(ServiceError::Internal)?
            .change_context(ServiceError::Internal)?;

        let user = self
            .users
            .create_first(username, hash)
            .await
            .change_context(ServiceError::Repository)?
            .ok_or_else(|| {
                warn!("a concurrent registration created the admin account first");
                ServiceError::RegistrationClosed.into_report()
            })?;

        info!("admin '{}' registered", user.username);
        self.session(user)
    }

    #[instrument(skip_all, name = "service#login")]
    pub async fn login(&self, credentials: Credentials) -> ServiceResult<Session> {
        let (username, password) = credentials.require()?;

        let Some(stored) = self
            .users
            .find_credentials(username.clone())
            .await
            .change_context(ServiceError::Repository)?
        else {
            warn!("login attempted for unknown user '{username}'");
            metrics::increment_logins("rejected");
            return Err(ServiceError::InvalidCredentials.into_report());
        };

        let hash = stored.password_hash;
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .change_context(ServiceError::Internal)?
            .unwrap_or(false);
        if !matches {
            warn!("wrong password for '{username}'");
            metrics::increment_logins("rejected");
            return Err(ServiceError::InvalidCredentials.into_report());
        }

        metrics::increment_logins("accepted");
        self.session(stored.user)
    }

    fn session(&self, user: AdminUser) -> ServiceResult<Session> {
        let token = self
            .keys
            .issue(user.id.to_string())
            .change_context(ServiceError::Internal)?;

        Ok(Session {
            id: user.id,
            username: user.username,
            token,
        })
    }
}

/// Resolves token ids to admin accounts for the auth guard.
#[derive(Debug, Clone)]
pub struct Principals<U>(pub U);

impl<U> PrincipalStore for Principals<U>
where
    U: UserRepository + Clone + Send + Sync + 'static,
{
    type Principal = AdminUser;

    async fn principal(&self, id: String) -> Result<Option<AdminUser>, Report<PrincipalLookupError>> {
        let Ok(id) = id.parse::<EntityId>() else {
            return Ok(None);
        };
        self.0.find(id).await.change_context(PrincipalLookupError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use repositories::memory::MemoryEngine;

    fn service(engine: &MemoryEngine) -> AccountService<MemoryEngine> {
        AccountService::new(
            engine,
            TokenKeys::from_secret(b"accounts", Duration::days(30)),
            4,
        )
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: Some(username.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn only_the_first_admin_can_register() {
        let engine = MemoryEngine::default();
        let service = service(&engine);

        let session = service.register(credentials("admin", "pass")).await.unwrap();
        assert_eq!("admin", session.username);

        let err = service
            .register(credentials("second", "pass"))
            .await
            .unwrap_err();
        assert!(matches!(err.current_context(), ServiceError::RegistrationClosed));
    }

    #[tokio::test]
    async fn concurrent_registrations_create_one_admin() {
        let engine = MemoryEngine::default();
        let service = service(&engine);

        let (first, second) = tokio::join!(
            service.register(credentials("asha", "pass")),
            service.register(credentials("vinay", "pass")),
        );

        assert_eq!(1, [&first, &second].iter().filter(|r| r.is_ok()).count());
        assert_eq!(1, engine.users().count().await.unwrap());
    }

    #[tokio::test]
    async fn login_checks_the_password() {
        let engine = MemoryEngine::default();
        let service = service(&engine);
        let registered = service.register(credentials("admin", "pass")).await.unwrap();

        let session = service.login(credentials("admin", "pass")).await.unwrap();
        assert_eq!(registered.id, session.id);

        let wrong = service.login(credentials("admin", "nope")).await.unwrap_err();
        assert!(matches!(wrong.current_context(), ServiceError::InvalidCredentials));
        let unknown = service.login(credentials("ghost", "pass")).await.unwrap_err();
        assert!(matches!(unknown.current_context(), ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn blank_credentials_are_invalid() {
        let engine = MemoryEngine::default();

        let err = service(&engine)
            .login(credentials("admin", "  "))
            .await
            .unwrap_err();

        assert!(matches!(err.current_context(), ServiceError::Invalid(_)));
    }

    #[tokio::test]
    async fn principals_ignore_ids_that_do_not_parse() {
        let engine = MemoryEngine::default();
        let principals = Principals(trust_core::ContentEngine::users(&engine));

        assert_eq!(None, principals.principal("admin".to_string()).await.unwrap());
    }
}
