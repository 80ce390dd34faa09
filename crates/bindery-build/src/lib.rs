//! Documentation build pipeline for the YASL native library.
//!
//! Drives two external tools in sequence: the binary-description generator
//! scans the public headers into an XML declaration tree, then the
//! static-site generator renders the docs sources plus that XML into
//! browsable HTML. Installing the toolchain lives in `bindery-env`.

pub mod doxygen;
pub mod pipeline;
pub mod sphinx;

pub use doxygen::{Doxygen, DoxygenConfig};
pub use pipeline::{
    BuildConfig, BuildError, BuildResult, DocBuilder, DEFAULT_HEADERS, DEFAULT_PREDEFINED,
};
pub use sphinx::SphinxInvocation;
