//! The transport seam consumed by the bounded reader.
//!
//! [`Connection`] captures the only two capabilities the reader needs from
//! its transport: an asynchronous partial read and an early close. Keeping
//! the trait this small lets a real socket and an in-memory test double
//! substitute for each other, including behind dynamic dispatch.

mod socket;

use std::io;

use async_trait::async_trait;
use tokio::io::ReadBuf;

use crate::protocol::ReadOutcome;

/// An asynchronous bidirectional byte-stream endpoint.
///
/// `read` fills some prefix of the destination's free space and reports
/// either the number of bytes delivered or end-of-stream; it must never
/// touch bytes beyond that free space. `close` shuts the endpoint down
/// before its natural end of life.
///
/// Every `AsyncRead + AsyncWrite` type implements this trait for free,
/// see the socket adapter in this module.
#[async_trait]
pub trait Connection {
    /// Reads into the free space of `dst`, returning the byte count or EOF.
    async fn read(&mut self, dst: &mut ReadBuf<'_>) -> io::Result<ReadOutcome>;

    /// Shuts the endpoint down.
    async fn close(&mut self) -> io::Result<()>;
}
