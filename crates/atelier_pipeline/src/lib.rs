//! Per-image upload, thumbnail, link and summary orchestration.
//!
//! [`AssetPipeline`] drives each image of a batch through a strictly
//! sequential stage progression and contains failures at the item boundary:
//! one item's failure never blocks its siblings, and every transition is
//! reported through the injected status sink and recorded in the session
//! context.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod pipeline;
mod stage;

pub use pipeline::{AssetPipeline, DEFAULT_FOLDER};
pub use stage::ItemStage;
