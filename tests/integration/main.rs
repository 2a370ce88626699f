//! Integration tests for Contact-Sieve
//!
//! These tests use wiremock to create mock HTTP servers and run sites through
//! the full fetch, extract, rank, and record cycle.

mod pipeline_tests;
