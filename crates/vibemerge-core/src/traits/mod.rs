//! Ports implemented by the infrastructure crates

mod ports;

pub use ports::{CleanupPublisher, MetadataSource, PortResult, WorkQueue};
