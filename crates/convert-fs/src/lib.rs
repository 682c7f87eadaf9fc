//! Filesystem primitives for the function converter
//!
//! Provides the well-known workspace paths, plain manifest I/O and the
//! staged directory relocation used to move user code out of the way.

pub mod constants;
pub mod error;
pub mod io;
pub mod relocate;

pub use constants::WorkspacePath;
pub use error::{Error, Result};
pub use relocate::{Relocation, move_to_subdirectory, validate_dir_name};
