//! Line input read off the async runtime

use std::{io::BufRead, thread};

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Read lines from `reader` on a dedicated thread.
///
/// The receiver yields each line and closes at end of input or on a read
/// error. The thread is detached: a read blocked on a terminal never holds
/// up process exit.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let spawned = thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            debug!("Input reader finished");
        });

    // On spawn failure the sender is dropped with the closure, so the
    // receiver reports end of input straight away
    if let Err(e) = spawned {
        warn!("Failed to start input reader: {}", e);
    }
    rx
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[tokio::test]
    async fn test_lines_then_end_of_input() {
        let mut rx = spawn_line_reader(Cursor::new("add\nname Plank\n"));
        assert_eq!(rx.recv().await.as_deref(), Some("add"));
        assert_eq!(rx.recv().await.as_deref(), Some("name Plank"));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_blocked_reader_does_not_hold_shutdown() {
        // Never returns from its first read, like a terminal nobody types in
        struct Stalled;
        impl std::io::Read for Stalled {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                thread::park();
                Ok(0)
            }
        }

        let mut rx = spawn_line_reader(std::io::BufReader::new(Stalled));
        let shutdown = async {};
        let stopped = tokio::select! {
            _ = rx.recv() => false,
            _ = shutdown => true,
        };
        assert!(stopped);
        drop(rx);
    }
}
