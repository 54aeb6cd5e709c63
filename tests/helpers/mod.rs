// Test helper modules
//
// Stubs for the facade's collaborators plus a data factory. Each test
// binary includes this module with `#[path]`, so not every helper is used
// everywhere.
#![allow(dead_code)]

pub mod test_data;

pub use recording_transport::*;
pub use test_data::*;
