pub mod content;
pub mod limiter;
pub mod mail;
pub mod utils;
