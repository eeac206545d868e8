use std::cmp;
use std::fmt;

use bytes::{Buf, BytesMut};
use tokio::io::ReadBuf;
use tracing::{info, trace};

use crate::connection::Connection;
use crate::protocol::{ReadOutcome, StreamError};

/// A streaming byte reader that never delivers more than a fixed budget.
///
/// `BoundedReader` presents one read interface over two sources: bytes a
/// header parser already pulled off the wire (the prebuffer), and fresh
/// bytes from the underlying connection. It reports end-of-stream exactly
/// when the budget runs out, independent of the physical connection's own
/// EOF, and it never lets a single connection read consume bytes belonging
/// to the next logical message on the same connection.
///
/// The reader borrows the connection. The component that constructed it
/// keeps ownership and may hand the connection to the next logical message
/// once this reader is exhausted and closed.
pub struct BoundedReader<'conn, C>
where
    C: Connection + ?Sized,
{
    /// Bytes already fetched from the connection, delivered before any
    /// fresh read
    prebuffer: BytesMut,
    connection: &'conn mut C,
    /// Bytes still owed to the consumer, zero is terminal
    remaining: u64,
}

impl<'conn, C> BoundedReader<'conn, C>
where
    C: Connection + ?Sized,
{
    /// Creates a reader delivering at most `remaining` bytes.
    ///
    /// `prebuffer` holds look-ahead bytes that were already consumed from
    /// `connection` (it may be empty); they count against `remaining` as
    /// they are delivered. `remaining` is typically a parsed
    /// Content-Length.
    pub fn new(prebuffer: BytesMut, connection: &'conn mut C, remaining: u64) -> Self {
        Self { prebuffer, connection, remaining }
    }

    /// Number of bytes still owed to the consumer.
    ///
    /// After an end-of-stream outcome this is how callers distinguish
    /// normal exhaustion (`0`) from premature connection termination
    /// (`> 0`).
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Returns true once the full budget has been delivered.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Fills the free space of `dst` with up to `remaining` bytes.
    ///
    /// Prebuffered bytes are drained first, in wire order; only then is a
    /// single read issued against the connection, bounded to the smaller
    /// of the destination's free space and the remaining budget. Returns
    /// [`ReadOutcome::Eof`] once the budget is exhausted, or earlier if
    /// the connection ends prematurely. The two cases share the signal
    /// and are told apart via [`remaining`](Self::remaining).
    ///
    /// A call that copied prebuffered bytes and then saw the connection
    /// end still reports the copied count; end-of-stream follows on the
    /// next call. The returned count always matches what was written into
    /// `dst`.
    pub async fn read(&mut self, dst: &mut ReadBuf<'_>) -> Result<ReadOutcome, StreamError> {
        if self.remaining == 0 {
            return Ok(ReadOutcome::Eof);
        }

        let copied = self.drain_prebuffer(dst);

        if dst.remaining() == 0 || self.remaining == 0 {
            return Ok(ReadOutcome::Data(copied));
        }

        // Bound the view so the connection can never hand over bytes of
        // the next logical message, even when `dst` has more free space
        // than this stream is owed.
        let len = cmp::min(self.remaining, dst.remaining() as u64) as usize;
        let mut view = ReadBuf::new(dst.initialize_unfilled_to(len));

        match self.connection.read(&mut view).await? {
            ReadOutcome::Data(rc) => {
                // The budget only shrinks by byte counts actually
                // observed, a read cancelled mid-flight leaves it intact.
                self.remaining -= rc as u64;
                dst.advance(rc);
                trace!(copied, rc, remaining = self.remaining, "bounded read");
                Ok(ReadOutcome::Data(copied + rc))
            }
            ReadOutcome::Eof if copied > 0 => Ok(ReadOutcome::Data(copied)),
            ReadOutcome::Eof => Ok(ReadOutcome::Eof),
        }
    }

    /// Reads and discards bytes until the stream is exhausted or the
    /// connection ends, returning how many were thrown away.
    ///
    /// This keeps a connection parseable for the next logical message
    /// when a consumer stops caring about the rest of the current one.
    pub async fn skip(&mut self) -> Result<u64, StreamError> {
        let mut scratch = [0u8; 4096];
        let mut skipped = 0u64;

        while self.remaining > 0 {
            let mut dst = ReadBuf::new(&mut scratch);
            match self.read(&mut dst).await? {
                // A conforming connection returns zero bytes only for a
                // zero-capacity destination, bail out rather than spin.
                ReadOutcome::Data(0) | ReadOutcome::Eof => break,
                ReadOutcome::Data(n) => skipped += n as u64,
            }
        }

        if skipped > 0 {
            info!(skipped, "skip unread stream bytes");
        }
        Ok(skipped)
    }

    /// Closes the bounded stream.
    ///
    /// An abandoned stream (`remaining > 0`) still has unread bytes of
    /// this message sitting on the wire, and nothing downstream can
    /// resynchronize past them, so the whole connection is closed. A
    /// fully consumed stream leaves the connection untouched and
    /// reusable.
    pub async fn close(self) -> Result<(), StreamError> {
        if self.remaining > 0 {
            info!(remaining = self.remaining, "bounded stream abandoned, closing connection");
            self.connection.close().await?;
        }
        Ok(())
    }

    /// Copies prebuffered bytes into `dst`, capped by the budget.
    ///
    /// Surplus look-ahead bytes beyond the budget stay in the prebuffer,
    /// they belong to the next logical message.
    fn drain_prebuffer(&mut self, dst: &mut ReadBuf<'_>) -> usize {
        if !self.prebuffer.has_remaining() || dst.remaining() == 0 {
            return 0;
        }

        let len = cmp::min(
            cmp::min(self.prebuffer.remaining(), dst.remaining()) as u64,
            self.remaining,
        ) as usize;

        dst.put_slice(&self.prebuffer[..len]);
        self.prebuffer.advance(len);
        self.remaining -= len as u64;
        len
    }
}

impl<C> fmt::Debug for BoundedReader<'_, C>
where
    C: Connection + ?Sized,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedReader")
            .field("prebuffered", &self.prebuffer.len())
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}
