//! Upload module
//!
//! This module handles:
//! - Turning picked files into displayable pending images (preview.rs)
//! - Validating and publishing pending images into the collection (pipeline.rs)

pub mod pipeline;
pub mod preview;

pub use pipeline::{next_image_id, publish, UploadDraft};
pub use preview::{load_pending_image, PendingImage};
