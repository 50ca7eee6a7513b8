pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod pipeline;
pub mod progress;
pub mod proxy;
pub mod site;
pub mod slug;
pub mod store;
pub mod text;

// Re-export main types for convenience
pub use config::{ListenBehaviour, PlatformLinks, SharePlatform, SiteConfig, StaticPage};
pub use error::{
    BuildError, ConfigError, FeedError, LoadError, StoreError, TemplateError, UpdateError,
};
pub use feed::{DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_ITEMS, FeedNormalizer, NormalizeOptions, is_url};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use pipeline::{SiteBuild, UpdateResult, fetch_store, update_site};
pub use progress::{NoopReporter, ProgressEvent, ProgressReporter, SharedProgressReporter};
pub use proxy::ProxyState;
pub use site::{SiteTemplates, WriteSummary, build_site};
pub use slug::slugify;
pub use store::{EpisodeStore, FeedDocument};
