//! Browser-side episode rendering: acquisition chain, card grid and the
//! platform modal.

mod cache;
mod consent;
mod grid;
mod loader;
mod modal;
mod renderer;
mod source;

pub use cache::{CACHE_KEY, CACHE_TIMESTAMP_KEY, EpisodeCache, MemoryStorage, SessionStorage};
pub use consent::{ConsentProvider, StaticConsent};
pub use grid::{EMPTY_STATE, EpisodeGrid, LOADING_SPINNER};
pub use loader::{
    Banner, BannerKind, DataOrigin, EpisodeLoader, InfoBanner, LIVE_FAILED_MESSAGE,
    LOAD_FAILED_MESSAGE, LoadOutcome, NO_CONSENT_MESSAGE,
};
pub use modal::{
    ListenAction, ListenLinks, MODAL_ID, ModalEvent, ModalState, PlatformModal, listen_action,
};
pub use renderer::EpisodeRenderer;
pub use source::{EpisodeSource, HttpEpisodeSource};
