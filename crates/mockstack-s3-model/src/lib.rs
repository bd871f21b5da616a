//! Request, response and error types for the MockStack S3 emulator.
//!
//! Every operation has an `*Input` and `*Output` struct named after the AWS
//! operation. Inputs are plain data; [`RequestBody`] is the only field that
//! may need asynchronous draining before a handler can act on it.
#![allow(clippy::struct_excessive_bools)]
#![allow(missing_docs)]

pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod request;
pub mod types;

pub use error::{ErrorFault, S3Error, S3ErrorCode};
pub use operations::S3Operation;
pub use request::{ByteStream, RequestBody, StreamingBlob};
