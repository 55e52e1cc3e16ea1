pub mod browser;
pub mod events;
pub mod media;
pub mod storage;
