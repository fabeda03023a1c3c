pub mod config;
pub mod console;
pub mod extractor;
pub mod fetcher;
pub mod harvest;
pub mod html;
pub mod lookup;
pub mod matcher;
pub mod table;
