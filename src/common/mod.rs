//! Miscellaneous common structs used throughout the library.

mod id;
mod node;
mod path;
mod routing_table;

pub use id::*;
pub use node::*;
pub use path::*;
pub use routing_table::*;
