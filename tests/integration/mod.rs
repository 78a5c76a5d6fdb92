//! Integration tests for the Trellis context framework

mod cli;
mod config_integration;
mod factory_context;
pub mod test_utils;
