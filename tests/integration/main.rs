//! Integration tests for url-sieve
//!
//! These tests use wiremock to create mock HTTP servers and run the checker
//! end-to-end against them.

mod common;
mod redirect_tests;
mod status_tests;
