//! Unit test suite for host_io
