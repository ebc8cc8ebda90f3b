pub mod generate_text_post;
pub mod neo_feed_get;
pub mod neo_lookup_get;
pub mod request_common;
