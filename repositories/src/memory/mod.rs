//! Repositories that keep everything in process memory. Clones share data.
//!
//! Used by the route tests and for running the service without a database.

use trust_core::ContentEngine;
use trust_core::model::{
    Activity, ContactMessage, Donation, Event, Highlight, MediaItem, Member, PageContent, Sponsor,
    UpcomingEvent,
};
use trust_core::ordered::OrderedStore;

mod images;
mod ordered;
mod stored;
mod users;

pub use images::MemoryImageStore;
pub use ordered::MemoryOrderedRepo;
pub use stored::MemoryStored;
pub use users::MemoryUserRepo;

#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    activities: MemoryOrderedRepo<Activity>,
    events: MemoryOrderedRepo<Event>,
    sponsors: MemoryOrderedRepo<Sponsor>,
    members: MemoryOrderedRepo<Member>,
    media: MemoryOrderedRepo<MediaItem>,
    highlights: MemoryStored<Highlight>,
    messages: MemoryStored<ContactMessage>,
    content: MemoryStored<PageContent>,
    donations: MemoryStored<Donation>,
    upcoming_events: MemoryStored<UpcomingEvent>,
    users: MemoryUserRepo,
    images: MemoryImageStore,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! ordered_store {
    ($($record:ty => $field:ident),+ $(,)?) => {
        $(
            impl OrderedStore<$record> for MemoryEngine {
                type Repo = MemoryOrderedRepo<$record>;

                fn ordered(&self) -> Self::Repo {
                    self.$field.clone()
                }
            }
        )+
    };
}

ordered_store!(
    Activity => activities,
    Event => events,
    Sponsor => sponsors,
    Member => members,
    MediaItem => media,
);

impl ContentEngine for MemoryEngine {
    type Highlights = MemoryStored<Highlight>;
    type Messages = MemoryStored<ContactMessage>;
    type Content = MemoryStored<PageContent>;
    type Donations = MemoryStored<Donation>;
    type UpcomingEvents = MemoryStored<UpcomingEvent>;
    type Users = MemoryUserRepo;
    type Images = MemoryImageStore;

    fn highlights(&self) -> Self::Highlights {
        self.highlights.clone()
    }

    fn messages(&self) -> Self::Messages {
        self.messages.clone()
    }

    fn content(&self) -> Self::Content {
        self.content.clone()
    }

    fn donations(&self) -> Self::Donations {
        self.donations.clone()
    }

    fn upcoming_events(&self) -> Self::UpcomingEvents {
        self.upcoming_events.clone()
    }

    fn users(&self) -> Self::Users {
        self.users.clone()
    }

    fn images(&self) -> Self::Images {
        self.images.clone()
    }
}
