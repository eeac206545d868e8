//! Blanket [`Connection`] adapter for tokio byte streams.

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadBuf};

use super::Connection;
use crate::protocol::ReadOutcome;

/// tokio reports end-of-stream as a zero-length read into a non-empty
/// buffer. That convention is lifted into the distinguished
/// [`ReadOutcome::Eof`] here, so a zero count always means "zero-capacity
/// destination" to callers.
#[async_trait]
impl<S> Connection for S
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn read(&mut self, dst: &mut ReadBuf<'_>) -> io::Result<ReadOutcome> {
        let unfilled = dst.initialize_unfilled();
        if unfilled.is_empty() {
            return Ok(ReadOutcome::Data(0));
        }

        let rc = AsyncReadExt::read(self, unfilled).await?;
        if rc == 0 {
            return Ok(ReadOutcome::Eof);
        }

        dst.advance(rc);
        Ok(ReadOutcome::Data(rc))
    }

    async fn close(&mut self) -> io::Result<()> {
        self.shutdown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn maps_bytes_and_eof() {
        let (mut local, mut remote) = tokio::io::duplex(64);
        remote.write_all(b"hello").await.unwrap();
        drop(remote);

        let mut storage = [0u8; 8];
        let mut dst = ReadBuf::new(&mut storage);
        let outcome = Connection::read(&mut local, &mut dst).await.unwrap();
        assert_eq!(outcome, ReadOutcome::Data(5));
        assert_eq!(dst.filled(), b"hello");

        let mut dst = ReadBuf::new(&mut storage);
        let outcome = Connection::read(&mut local, &mut dst).await.unwrap();
        assert_eq!(outcome, ReadOutcome::Eof);
    }

    #[tokio::test]
    async fn zero_capacity_destination_is_not_eof() {
        let (mut local, _remote) = tokio::io::duplex(64);

        let mut storage = [0u8; 0];
        let mut dst = ReadBuf::new(&mut storage);
        let outcome = Connection::read(&mut local, &mut dst).await.unwrap();
        assert_eq!(outcome, ReadOutcome::Data(0));
    }

    #[tokio::test]
    async fn close_shuts_down_the_write_side() {
        let (mut local, mut remote) = tokio::io::duplex(64);
        Connection::close(&mut local).await.unwrap();

        let mut buf = [0u8; 4];
        let rc = AsyncReadExt::read(&mut remote, &mut buf).await.unwrap();
        assert_eq!(rc, 0);
    }
}
