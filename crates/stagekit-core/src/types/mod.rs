//! Type system utilities and aliases.
//!
//! - [`aliases`]: Type aliases for `Rc<RefCell<T>>` and callback shapes.

pub mod aliases;

pub use aliases::*;
