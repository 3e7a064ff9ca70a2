//! Tool Integration
//!
//! Execute external tools (rollup, terser, eslint, stylelint) through `npx`
//! and expose the bundling and minification capabilities the build needs.

#![warn(missing_docs)]

pub mod r#trait;
pub mod builtin;
pub mod bundler;
pub mod minifier;
pub mod preamble;

pub use r#trait::{Tool, ToolFailure, ToolInput, ToolOutput};
pub use builtin::ProcessTool;
pub use bundler::{Bundler, RollupBundler};
pub use minifier::{Minifier, TerserMinifier};
pub use preamble::{format_timestamp, license_preamble};
