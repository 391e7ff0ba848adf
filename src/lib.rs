pub mod config;
pub mod error;
pub mod kick;
pub mod parser;
pub mod session;
pub mod share;
pub mod storage;
pub mod stream;
pub mod stream_list;
pub mod twitch;
pub mod youtube;
