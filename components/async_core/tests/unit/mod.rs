//! Unit test suite for async_core

mod eventual_test;
mod run_loop_test;
