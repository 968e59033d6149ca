use std::io::Read;

use crate::message::Message;
use serde_json::Deserializer;
use thiserror::Error;

/// Size of a single socket read.
pub const READ_CHUNK_LEN: usize = 65535;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReadMessageError {
    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("stream closed")]
    Closed,

    #[error("invalid message data - not a JSON object or stream desync")]
    Malformed(#[source] serde_json::Error),
}

/// Splits a byte stream into JSON object messages.
///
/// The telemetry feed has no framing of its own, so objects are delimited by
/// parsing: bytes past the end of one object stay buffered for the next.
pub struct MessageCodec<T> {
    inner: T,
    buffer: Vec<u8>,
    chunk: Box<[u8]>,
}

enum Parsed {
    Message(Message, usize),
    Incomplete,
    Whitespace,
    Invalid(serde_json::Error),
}

impl<T> MessageCodec<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
            chunk: vec![0u8; READ_CHUNK_LEN].into_boxed_slice(),
        }
    }

    /// Number of bytes received but not yet consumed by a message.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    fn parse_buffered(&self) -> Parsed {
        let mut stream = Deserializer::from_slice(&self.buffer).into_iter::<Message>();
        match stream.next() {
            Some(Ok(message)) => Parsed::Message(message, stream.byte_offset()),
            Some(Err(err)) if err.is_eof() => Parsed::Incomplete,
            Some(Err(err)) => Parsed::Invalid(err),
            None => Parsed::Whitespace,
        }
    }
}

impl<T> MessageCodec<T>
where
    T: Read,
{
    pub fn read_message(&mut self) -> Result<Message, ReadMessageError> {
        loop {
            match self.parse_buffered() {
                Parsed::Message(message, consumed) => {
                    self.buffer.drain(..consumed);
                    return Ok(message);
                }
                Parsed::Invalid(err) => {
                    self.buffer.clear();
                    return Err(ReadMessageError::Malformed(err));
                }
                Parsed::Whitespace => self.buffer.clear(),
                Parsed::Incomplete => {}
            }

            let len = self.inner.read(&mut self.chunk)?;
            if len == 0 {
                return Err(ReadMessageError::Closed);
            }
            self.buffer.extend_from_slice(&self.chunk[..len]);
        }
    }
}
