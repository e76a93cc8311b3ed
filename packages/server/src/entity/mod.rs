pub mod blob;
pub mod event;
pub mod event_image;
