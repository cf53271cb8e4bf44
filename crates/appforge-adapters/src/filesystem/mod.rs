//! Filesystem adapters.

mod local;
mod memory;

pub(crate) use local::copy_tree;
pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
