//! Terminal event plumbing.

mod terminal;

pub use terminal::{Event, Handler};
