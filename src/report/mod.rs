//! Report renderers for URL check results.
//!
//! - [`terminal`] — colored summary box, result table and per-URL reports; respects `--verbose` / `--quiet`.
//! - JSON output is the serialized `CheckOutcome` list, written by the binary.

pub mod terminal;
