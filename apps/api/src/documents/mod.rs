//! HTTP surface for document synthesis: template listing, structure preview,
//! and resume / cover-letter downloads.

pub mod handlers;
