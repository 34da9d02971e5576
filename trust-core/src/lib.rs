use model::{Activity, Event, MediaItem, Member, Sponsor};
use ordered::OrderedStore;
use repository::{
    DonationRepository, HighlightRepository, ImageStore, MessageRepository, PageContentRepository,
    UpcomingEventRepository, UserRepository,
};

pub mod defaults;
pub mod model;
pub mod ordered;
pub mod repository;
pub mod result;
pub mod validation;

/// Everything the service layer needs to reach persistence.
///
/// The five ordered resources are reached through [`OrderedStore`] so the
/// create/list/reorder handling can be written once for all of them.
pub trait ContentEngine:
    Clone
    + Send
    + Sync
    + 'static
    + OrderedStore<Activity>
    + OrderedStore<Event>
    + OrderedStore<Sponsor>
    + OrderedStore<Member>
    + OrderedStore<MediaItem>
{
    type Highlights: HighlightRepository + Send + Sync + 'static;
    type Messages: MessageRepository + Send + Sync + 'static;
    type Content: PageContentRepository + Send + Sync + 'static;
    type Donations: DonationRepository + Send + Sync + 'static;
    type UpcomingEvents: UpcomingEventRepository + Send + Sync + 'static;
    type Users: UserRepository + Clone + Send + Sync + 'static;
    type Images: ImageStore + Send + Sync + 'static;

    fn highlights(&self) -> Self::Highlights;
    fn messages(&self) -> Self::Messages;
    fn content(&self) -> Self::Content;
    fn donations(&self) -> Self::Donations;
    fn upcoming_events(&self) -> Self::UpcomingEvents;
    fn users(&self) -> Self::Users;
    fn images(&self) -> Self::Images;
}
