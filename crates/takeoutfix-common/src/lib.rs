//! Takeoutfix-Common: Shared extension handling and error types.
//!
//! This crate provides common functionality used across takeoutfix:
//!
//! - **Extension Tokens**: Normalization of file extensions to `.lowercase` form
//! - **Compatibility Classes**: Extensions that name the same media container
//! - **Path Utilities**: Detection of supported photo/video files by extension
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use takeoutfix_common::{are_extensions_compatible, normalize_extension};
//! use takeoutfix_common::paths::is_supported_media;
//! use std::path::Path;
//!
//! assert_eq!(normalize_extension(" JPG "), ".jpg");
//! assert!(are_extensions_compatible(".jpg", "JPEG"));
//! assert!(is_supported_media(Path::new("IMG_0001.HEIC")));
//! ```

pub mod compat;
pub mod error;
pub mod extension;
pub mod paths;

pub use compat::are_extensions_compatible;
pub use error::{Error, Result};
pub use extension::{extension_of, normalize_extension};
