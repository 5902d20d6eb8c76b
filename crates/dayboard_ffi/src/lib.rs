//! Flutter bridge for the Dayboard core.

pub mod api;
