pub mod feed;
pub mod http;
pub mod text;
