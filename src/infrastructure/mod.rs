pub mod feeds;
pub mod file;
pub mod llm;
pub mod sqlite;
