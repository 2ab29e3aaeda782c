#![forbid(unsafe_code)]

//! folio demo: render a JSON document tree as one terminal frame.

pub mod app;
pub mod cli;
pub mod logging;
