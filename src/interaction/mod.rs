//! User interaction with laid-out cards: dragging, tag filtering and
//! resize coalescing.

pub mod drag;
pub mod filter;
pub mod resize;

pub use drag::{DragController, DragSession, PointerInput, PointerSource, BASE_Z_INDEX};
pub use filter::{FilterController, FilterSet};
pub use resize::{Debouncer, RESIZE_DEBOUNCE_MS};
