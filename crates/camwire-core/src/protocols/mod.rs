//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: byte offsets, sentinels and lookup tables
//! - `reader`: bounds-checked byte access
//! - `parser`: message decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; sources and the pipeline handle file
//! access and scheduling.

pub mod game;
