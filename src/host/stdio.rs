//! Line-delimited JSON host over stdin/stdout

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::worker::{spawn_worker, WorkerConfig};

/// Feed frames from `input` to a single worker and write its notifications to
/// `output`, one JSON value per line.
///
/// Returns once `input` is exhausted and every pending countdown has finished.
pub async fn run_stdio_host<R, W>(config: WorkerConfig, input: R, mut output: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (mut handle, mut notifications) = spawn_worker(config);
    let mut lines = input.lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) => {
                        let frame = line.trim();
                        if frame.is_empty() {
                            continue;
                        }
                        debug!("Received frame: {}", frame);
                        if let Err(e) = handle.post_message(frame) {
                            warn!("Dropping malformed frame {:?}: {}", frame, e);
                        }
                    }
                    None => {
                        info!("Input closed, waiting for pending countdowns");
                        input_open = false;
                        handle.close();
                    }
                }
            }
            notification = notifications.recv() => {
                match notification {
                    Some(notification) => {
                        output.write_all(notification.encode().as_bytes()).await?;
                        output.write_all(b"\n").await?;
                        output.flush().await?;
                    }
                    None => break,
                }
            }
        }
    }

    handle.join().await;
    Ok(())
}
