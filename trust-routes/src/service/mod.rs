mod accounts;
mod highlights;
mod messages;
mod ordered;
mod singletons;
mod upcoming;
mod uploads;

pub use accounts::{AccountService, Credentials, Principals, Session};
pub use highlights::HighlightService;
pub use messages::MessageService;
pub use ordered::OrderedService;
pub use singletons::{ContentService, DonationService};
pub use upcoming::UpcomingEventService;
pub use uploads::{DEFAULT_MAX_UPLOAD_BYTES, UploadService};
