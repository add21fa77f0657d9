//! # takeoutfix-exif
//!
//! ExifTool integration for takeoutfix.
//!
//! This crate provides functionality for:
//! - Locating the exiftool executable
//! - Running exiftool behind a replaceable [`CommandRunner`]
//! - Parsing exiftool's warning-laden text output
//! - Detecting the real type of a file
//! - Discovering which file types exiftool can write metadata into
//!
//! ## Example
//!
//! ```no_run
//! use takeoutfix_exif::{get_new_extension, CommandRunner, ExifTool, WritableRegistry};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let exiftool = Arc::new(ExifTool::discover(None)?);
//! let ext = get_new_extension(Path::new("IMG_0001.jpg"), Some(exiftool.as_ref() as &dyn CommandRunner))?;
//!
//! let registry = WritableRegistry::with_runner(exiftool);
//! if !ext.is_empty() && registry.is_writable(&ext)? {
//!     println!("exiftool can write {ext}");
//! }
//! # Ok::<(), takeoutfix_exif::Error>(())
//! ```

pub mod command;
mod error;
pub mod filetype;
pub mod output;
pub mod tools;
pub mod writable;

// Re-exports
pub use command::{CommandRunner, ExifTool};
pub use error::{Error, Result};
pub use filetype::get_new_extension;
pub use output::{first_error_line, has_error_line, parse_file_type_extension};
pub use tools::{check_exiftool, check_tool, resolve_exiftool, ToolInfo};
pub use writable::{init_global, is_writable_extension, WritableRegistry};
