//! Integration tests against a mock HTTP backend

mod gate_flow_tests;
mod persistence_tests;
mod session_tests;
