//! The bounded reader sitting between a connection and a message consumer.

mod bounded_reader;

pub use bounded_reader::BoundedReader;
