//! Unit tests for the backlog context.

mod filesystem_store_tests;
mod round_trip_tests;
