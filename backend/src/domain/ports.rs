//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait exposes a strongly typed error so adapters map their failures
//! into predictable variants.

mod session_datasets;

#[cfg(test)]
pub use session_datasets::MockSessionDatasets;
pub use session_datasets::{SessionDataset, SessionDatasets, SessionDatasetsError};
