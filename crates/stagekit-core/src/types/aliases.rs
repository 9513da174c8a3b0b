//! Type aliases for commonly used complex types.
//!
//! The engine is single-threaded: it runs inside pointer-event handlers on the
//! UI thread, so shared state is `Rc<RefCell<T>>` rather than `Arc<Mutex<T>>`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stagekit_core::types::*;
//!
//! let state: Shared<MyState> = shared(MyState::default());
//! state.borrow_mut().update();
//! ```

use std::cell::RefCell;
use std::rc::Rc;

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
pub type Shared<T> = Rc<RefCell<T>>;

/// Callback invoked with every committed frame of a gesture.
///
/// The engine never holds a live reference into UI state; it hands each
/// committed value to this callback instead.
pub type CommitCallback<T> = Box<dyn FnMut(T)>;

/// Wraps a value in [`Shared`].
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}
