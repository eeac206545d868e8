//! An asynchronous length-bounded streaming byte reader
//!
//! This crate provides the byte-accounting layer that sits between a raw
//! bidirectional connection and a higher-level message consumer, such as an
//! HTTP request body reader. A [`reader::BoundedReader`] presents a single
//! read interface that first drains bytes a header parser already pulled off
//! the wire, then continues reading fresh bytes from the connection, while
//! never delivering more than a fixed remaining-length budget and reporting
//! end-of-stream exactly when that budget is exhausted, independent of the
//! physical connection's own EOF.
//!
//! # Features
//!
//! - Pre-buffered bytes are always delivered before fresh bytes, preserving
//!   wire order
//! - Connection reads are bounded so a single read can never consume bytes
//!   belonging to the next logical message on the same connection
//! - Allocation-free buffer arithmetic over [`tokio::io::ReadBuf`] cursors
//! - An abandoned stream force-closes the connection, a fully consumed one
//!   leaves it reusable
//! - Small [`connection::Connection`] seam so real sockets and in-memory
//!   test doubles substitute for each other
//!
//! # Example
//!
//! ```no_run
//! use bounded_stream::protocol::ReadOutcome;
//! use bounded_stream::reader::BoundedReader;
//! use bytes::BytesMut;
//! use tokio::io::ReadBuf;
//! use tokio::net::TcpStream;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut stream = TcpStream::connect("127.0.0.1:8080").await?;
//!
//!     // bytes already pulled off the wire while a header was parsed
//!     let leftover = BytesMut::from(&b"partial body bytes"[..]);
//!
//!     // the header declared a 64 byte body
//!     let mut reader = BoundedReader::new(leftover, &mut stream, 64);
//!
//!     let mut body = Vec::new();
//!     let mut storage = [0u8; 16];
//!     loop {
//!         let mut dst = ReadBuf::new(&mut storage);
//!         match reader.read(&mut dst).await? {
//!             ReadOutcome::Data(_) => body.extend_from_slice(dst.filled()),
//!             ReadOutcome::Eof => break,
//!         }
//!     }
//!
//!     // fully consumed: the connection stays healthy for the next message
//!     reader.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into three modules:
//!
//! - [`reader`]: the bounded reader and its budget accounting
//! - [`connection`]: the two-operation transport seam it consumes
//! - [`protocol`]: shared vocabulary types (read outcome, errors)
//!
//! # Concurrency model
//!
//! A reader instance serves one consumer at a time; the connection read is
//! the only suspension point and the prebuffer drain never suspends.
//! Cancelling an in-flight read leaves the remaining budget untouched, the
//! budget only ever shrinks by byte counts that were actually observed.

pub mod connection;
pub mod protocol;
pub mod reader;
