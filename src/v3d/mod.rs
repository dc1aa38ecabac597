//! V3D binary scene format.
//!
//! V3D is a tagged XDR stream: every scalar is big-endian, every record
//! starts with a `u32` tag that fixes the shape of what follows.
//!
//! ## File Structure
//!
//! ```text
//! +------------------+
//! | Version          |  u32
//! +------------------+
//! | Header tag       |  u32 (5)
//! +------------------+
//! | Records ...      |  tag + body, any order
//! +------------------+
//! | Centers tag      |  u32 (4)
//! | Center count     |  u32
//! | Centers          |  count x (3 x f64)
//! +------------------+
//! ```

mod format;
pub mod writer;

pub use format::*;
pub use writer::*;
