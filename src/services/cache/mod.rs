pub mod client;
pub mod local;

pub use client::{CacheError, Loader, MemoCache};
pub use local::MokaMemoCache;
