pub mod asteroid;
pub mod generate_text;
pub mod neo_feed;
pub mod response_common;
