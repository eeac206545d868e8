//! Reads one length-prefixed message from a TCP client.
//!
//! Frame format: an ASCII decimal length terminated by `\n`, followed by
//! that many payload bytes. The header parse deliberately over-reads so the
//! bounded reader starts with a non-empty prebuffer, which is the situation
//! it exists for. Try it with:
//!
//! ```text
//! printf '5\nhello and the next message' | nc 127.0.0.1 3000
//! ```

use bounded_stream::protocol::ReadOutcome;
use bounded_stream::reader::BoundedReader;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, ReadBuf};
use tokio::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    info!(port = 3000, "waiting for one client");

    let (mut stream, remote_addr) = listener.accept().await?;
    info!(%remote_addr, "client connected");

    // read a first chunk, large enough to spill past the header line
    let mut chunk = BytesMut::zeroed(256);
    let n = stream.read(&mut chunk).await?;
    chunk.truncate(n);

    let newline = chunk.iter().position(|b| *b == b'\n').ok_or("missing length line")?;
    let declared: u64 = std::str::from_utf8(&chunk[..newline])?.trim().parse()?;
    let leftover = chunk.split_off(newline + 1);

    info!(declared, leftover = leftover.len(), "header parsed");

    let mut reader = BoundedReader::new(leftover, &mut stream, declared);

    let mut body = Vec::new();
    let mut storage = [0u8; 64];
    loop {
        let mut dst = ReadBuf::new(&mut storage);
        match reader.read(&mut dst).await? {
            ReadOutcome::Data(_) => body.extend_from_slice(dst.filled()),
            ReadOutcome::Eof => break,
        }
    }

    let complete = reader.is_exhausted();
    reader.close().await?;

    info!(
        received = body.len(),
        complete,
        body = %String::from_utf8_lossy(&body),
        "message read"
    );
    Ok(())
}
