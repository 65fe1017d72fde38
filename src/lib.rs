pub mod config;
pub mod dashscope;
pub mod editor;
pub mod error;
pub mod extract;
pub mod image;
pub mod server;
pub mod style;

pub use error::{Error, ErrorKind, Result};
