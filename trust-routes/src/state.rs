use crate::service::{
    AccountService, ContentService, DonationService, HighlightService, MessageService,
    OrderedService, Principals, UpcomingEventService, UploadService,
};
use axum::extract::FromRef;
use routing::{AuthState, TokenKeys};
use std::sync::Arc;
use trust_core::ContentEngine;
use trust_core::defaults::SingletonDefaults;

#[derive(Clone)]
pub struct TrustAppState<E: ContentEngine> {
    pub ordered: OrderedService<E>,
    pub highlights: HighlightService<E>,
    pub messages: MessageService<E>,
    pub content: ContentService<E>,
    pub donations: DonationService<E>,
    pub upcoming: UpcomingEventService<E>,
    pub uploads: UploadService<E>,
    pub accounts: AccountService<E>,
    auth: AuthState<Principals<E::Users>>,
}

impl<E: ContentEngine> TrustAppState<E> {
    pub fn new(engine: E, defaults: SingletonDefaults, keys: TokenKeys, bcrypt_cost: u32) -> Self {
        let defaults = Arc::new(defaults);
        Self {
            ordered: OrderedService::new(engine.clone()),
            highlights: HighlightService::new(engine.clone()),
            messages: MessageService::new(engine.clone()),
            content: ContentService::new(engine.clone(), Arc::clone(&defaults)),
            donations: DonationService::new(engine.clone(), defaults),
            upcoming: UpcomingEventService::new(engine.clone()),
            uploads: UploadService::new(engine.clone()),
            accounts: AccountService::new(&engine, keys.clone(), bcrypt_cost),
            auth: AuthState::new(keys, Principals(engine.users())),
        }
    }

    /// Raises or lowers the body limit of the upload route.
    pub fn with_upload_limit(mut self, max_bytes: usize) -> Self {
        self.uploads = self.uploads.with_max_bytes(max_bytes);
        self
    }

    /// What gated routes check tokens against.
    pub fn auth(&self) -> AuthState<Principals<E::Users>> {
        self.auth.clone()
    }
}

macro_rules! from_state {
    ($($service:ident => $field:ident),+ $(,)?) => {
        $(
            impl<E: ContentEngine> FromRef<TrustAppState<E>> for $service<E> {
                fn from_ref(input: &TrustAppState<E>) -> Self {
                    input.$field.clone()
                }
            }
        )+
    };
}

from_state! {
    OrderedService => ordered,
    HighlightService => highlights,
    MessageService => messages,
    ContentService => content,
    DonationService => donations,
    UpcomingEventService => upcoming,
    UploadService => uploads,
    AccountService => accounts,
}
