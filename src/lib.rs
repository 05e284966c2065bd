//! roster: browse, search and edit a user directory in memory.
//!
//! The record list is fetched once from a remote JSON endpoint
//! ([`io::source`]), held in a [`ops::store::RecordStore`], filtered live by
//! [`ops::filter`] and changed through [`ops::mutation::MutationController`].
//! Nothing is written back; edits last as long as the process.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod tui;
