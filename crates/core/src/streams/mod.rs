//! Stream composition: the per-request entry point.

mod composer;
mod types;

pub use composer::StreamComposer;
pub use types::{format_size, StreamEntry, StreamLocator, NO_RESULTS_DESCRIPTION, NO_RESULTS_URL};
