//! Response bodies written by blocking code.
//!
//! Sitemap pages are serialized by a synchronous XML writer on the blocking
//! pool. The bytes travel to the response through a bounded channel, so a
//! slow client throttles the writer instead of the page piling up in memory.

use axum::body::Body;
use futures::stream;
use std::io::{self, BufWriter, Write};
use tokio::sync::mpsc;
use tracing::warn;

const CHUNK_BYTES: usize = 16 * 1024;
const CHANNEL_CAPACITY: usize = 8;

type Chunk = io::Result<Vec<u8>>;

/// `Write` end of a streaming body; each write becomes one chunk.
pub struct ChannelWriter {
    tx: mpsc::Sender<Chunk>,
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.tx
            .blocking_send(Ok(buf.to_vec()))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "response body dropped"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `render` on the blocking pool and stream what it writes.
///
/// If `render` fails, the body yields an error after the bytes already
/// written, which aborts the response instead of ending it cleanly.
pub fn spawn_streaming<F>(render: F) -> Body
where
    F: FnOnce(BufWriter<ChannelWriter>) -> lingomap_core::Result<()> + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<Chunk>(CHANNEL_CAPACITY);
    let failure = tx.clone();

    tokio::task::spawn_blocking(move || {
        let writer = BufWriter::with_capacity(CHUNK_BYTES, ChannelWriter { tx });
        if let Err(e) = render(writer) {
            warn!(category = e.category(), "Aborting sitemap stream: {e}");
            // The receiver is gone when the client disconnected first.
            let _ = failure.blocking_send(Err(io::Error::other(e.to_string())));
        }
    });

    Body::from_stream(stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    }))
}
