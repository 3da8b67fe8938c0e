//! Background stdin reader feeding a channel.

use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use tracing::{debug, warn};

use crate::ByteSource;

/// Receiving end of the stdin reader thread.
pub struct ChannelSource {
    rx: Receiver<u8>,
    closed: bool,
}

impl ChannelSource {
    pub fn new(rx: Receiver<u8>) -> Self {
        Self { rx, closed: false }
    }

    /// True once the producer has gone away and the queue is drained.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ByteSource for ChannelSource {
    fn read_byte(&mut self, wait: Option<Duration>) -> Option<u8> {
        let got = match wait {
            Some(d) => self.rx.recv_timeout(d),
            None => self.rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match got {
            Ok(b) => Some(b),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }
}

/// Spawn a thread that copies raw stdin bytes into a channel.
pub fn spawn_stdin_reader() -> io::Result<ChannelSource> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("ted-stdin".into())
        .spawn(move || pump(io::stdin(), tx))?;
    Ok(ChannelSource::new(rx))
}

fn pump<R: Read>(mut input: R, tx: Sender<u8>) {
    let mut buf = [0u8; 1024];
    loop {
        match input.read(&mut buf) {
            Ok(0) => {
                debug!(target: "input.decode", "stdin_eof");
                return;
            }
            Ok(n) => {
                for &b in &buf[..n] {
                    if tx.send(b).is_err() {
                        return;
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                warn!(target: "input.decode", error = %e, "stdin_read_failed");
                return;
            }
        }
    }
}
