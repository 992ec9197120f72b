//! Event-based XML reading

pub mod cursor;
pub mod event;
pub mod parser;

pub use cursor::Cursor;
pub use event::{Event, EventSink};
pub use parser::Reader;
