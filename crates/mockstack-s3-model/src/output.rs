//! Operation outputs, grouped by resource.

pub mod bucket;
pub mod config;
pub mod list;
pub mod multipart;
pub mod object;

pub use bucket::*;
pub use config::*;
pub use list::*;
pub use multipart::*;
pub use object::*;
