//! Streaming response collection.

use futures_util::StreamExt;
use tracing::{debug, trace};

use crate::backend::DeltaStream;
use crate::error::CoachError;

/// Drain a delta stream into a single string.
///
/// Every chunk that carries text is appended to the accumulator, and
/// `on_partial` receives the whole accumulated text so far: a display should
/// replace what it showed before rather than append. Chunks without text are
/// skipped. The first error ends collection and is returned as-is.
///
/// The final text is trimmed of leading and trailing whitespace.
pub async fn collect_stream<F>(
    mut stream: DeltaStream,
    mut on_partial: F,
) -> Result<String, CoachError>
where
    F: FnMut(&str),
{
    let mut accumulated = String::new();
    let mut chunks = 0usize;

    while let Some(item) = stream.next().await {
        match item? {
            Some(delta) if !delta.is_empty() => {
                chunks += 1;
                trace!(chunk = chunks, len = delta.len(), "received delta");
                accumulated.push_str(&delta);
                on_partial(&accumulated);
            }
            _ => trace!("chunk without text delta"),
        }
    }

    debug!(chunks, len = accumulated.len(), "stream complete");
    Ok(accumulated.trim().to_string())
}
