//! ASCII VTK XML UnstructuredGrid (`.vtu`) support.
//!
//! Only the inline ASCII encoding is handled: binary and appended data
//! sections are rejected with a parse error. A single `<Piece>` per file is
//! supported.

pub mod reader;
pub mod writer;

mod scan;

pub use reader::{PointArray, VtuDocument};
