mod document;
mod episode;
mod persist;

pub use document::{FeedDocument, FeedMetadata, STATUS_OK};
pub use episode::{Enclosure, Episode, ItunesInfo, sort_newest_first};
pub use persist::EpisodeStore;
