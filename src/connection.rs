use crate::codec::{MessageCodec, ReadMessageError};
use crate::config::Config;
use crate::message::Message;
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

pub const INITIAL_BACKOFF: Duration = Duration::from_millis(250);
pub const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Exponential reconnect delay.
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
}

impl Backoff {
    pub fn new() -> Self {
        Self {
            next: INITIAL_BACKOFF,
        }
    }

    /// Returns the delay to wait now and doubles the following one.
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.next;
        self.next = (self.next * 2).min(MAX_BACKOFF);
        delay
    }

    pub fn reset(&mut self) {
        self.next = INITIAL_BACKOFF;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a connection to the telemetry feed and hands every message to a
/// handler, reconnecting whenever the feed drops.
pub struct Listener {
    config: Config,
    backoff: Backoff,
}

impl Listener {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            backoff: Backoff::new(),
        }
    }

    /// Runs until `handle` fails and returns that failure.
    ///
    /// Stream faults never end the loop: malformed frames are skipped and
    /// dropped connections are retried.
    pub fn listen<F, E>(&mut self, mut handle: F) -> E
    where
        F: FnMut(Message) -> Result<(), E>,
    {
        loop {
            let (host, port) = self.config.address();
            let stream = match TcpStream::connect((host, port)) {
                Ok(stream) => stream,
                Err(err) => {
                    log::warn!("connect to {}:{} failed: {}", host, port, err);
                    self.wait();
                    continue;
                }
            };
            log::info!("connected to telemetry at {}:{}", host, port);
            self.backoff.reset();

            let mut codec = MessageCodec::new(stream);
            loop {
                match codec.read_message() {
                    Ok(message) => {
                        log::trace!("received {:?}", message);
                        if let Err(err) = handle(message) {
                            return err;
                        }
                    }
                    Err(ReadMessageError::Malformed(err)) => {
                        log::warn!("skipping malformed telemetry frame: {}", err);
                    }
                    Err(ReadMessageError::Closed) => {
                        log::warn!("telemetry feed closed the connection");
                        break;
                    }
                    Err(err) => {
                        log::warn!("telemetry read failed: {}", err);
                        break;
                    }
                }
            }
            self.wait();
        }
    }

    fn wait(&mut self) {
        let delay = self.backoff.next_delay();
        log::debug!("reconnecting in {:?}", delay);
        thread::sleep(delay);
    }
}
