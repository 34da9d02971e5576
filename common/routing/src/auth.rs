mod claims;
mod principal;
mod token;

pub use claims::{Claims, TokenError, TokenKeys};
pub use principal::{PrincipalLookupError, PrincipalStore};
pub use token::{AuthRejection, AuthState, require_principal};
