//! Payload types crossing the handler boundary.
//!
//! Requests carry a [`RequestBody`], which may be a byte buffer, text, or an
//! asynchronous stream of chunks. Responses carry a [`StreamingBlob`], which
//! is fully materialized and can be read any number of times.

use std::{fmt, io, pin::Pin};

use bytes::Bytes;
use futures::Stream;

/// An asynchronous sequence of body chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, io::Error>> + Send>>;

/// The body of an upload request.
pub enum RequestBody {
    /// Raw bytes.
    Bytes(Bytes),
    /// Text, stored as its UTF-8 encoding.
    Text(String),
    /// A chunked stream that must be drained before the payload is known.
    Stream(ByteStream),
}

impl RequestBody {
    /// Wrap an asynchronous chunk stream.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<Bytes, io::Error>> + Send + 'static,
    {
        Self::Stream(Box::pin(stream))
    }

    /// Returns true when the body is a stream whose length is not yet known.
    #[must_use]
    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::Bytes(Bytes::new())
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            Self::Text(s) => f.debug_tuple("Text").field(&s.len()).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl From<Bytes> for RequestBody {
    fn from(data: Bytes) -> Self {
        Self::Bytes(data)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data.into())
    }
}

impl From<&'static [u8]> for RequestBody {
    fn from(data: &'static [u8]) -> Self {
        Self::Bytes(Bytes::from_static(data))
    }
}

impl From<String> for RequestBody {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RequestBody {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// A fully materialized response body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamingBlob {
    /// The underlying bytes data.
    pub data: Bytes,
}

impl StreamingBlob {
    /// Create a new `StreamingBlob` from bytes.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Returns true if the blob is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the length of the blob.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Borrow the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy the bytes into an owned vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    /// Decode the bytes as UTF-8 text.
    pub fn to_text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.data.to_vec())
    }
}

impl From<Bytes> for StreamingBlob {
    fn from(data: Bytes) -> Self {
        Self { data }
    }
}

impl From<Vec<u8>> for StreamingBlob {
    fn from(data: Vec<u8>) -> Self {
        Self { data: data.into() }
    }
}

impl From<&[u8]> for StreamingBlob {
    fn from(data: &[u8]) -> Self {
        Self {
            data: Bytes::copy_from_slice(data),
        }
    }
}
