pub mod analyzers;
pub mod config;
pub mod output;
pub mod parser;
pub mod record;
pub mod server;
pub mod source;
