//! HTTP handlers, one module per resource.

pub mod auth;
pub mod celebrity;
pub mod product;
pub mod video;
pub mod video_tag;
