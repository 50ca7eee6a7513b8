mod fetch;
mod parse;

pub use fetch::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_ITEMS, FeedNormalizer, NormalizeOptions, fetch_feed_bytes,
    is_url,
};
pub use parse::parse_feed;
