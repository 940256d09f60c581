//! Outbound publishing: the Poppit work queue and the TimeBomb channel.

mod publisher;

pub use publisher::Publisher;
