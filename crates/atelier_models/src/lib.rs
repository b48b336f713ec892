//! Vision-model summarization and background-removal clients for Atelier.
//!
//! Both collaborators are consumed by the pipeline through small traits so
//! tests can substitute in-memory fakes: [`Summarizer`] turns an image URL
//! into opaque marketing text, [`BackgroundRemover`] turns image bytes into
//! transparency-carrying image bytes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;
mod rembg;
mod traits;

pub use openai::OpenAiSummarizer;
pub use rembg::RembgClient;
pub use traits::{BackgroundRemover, Summarizer};
