//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below maps to a file that exercises one layer against the
//! recording mocks in `mock_hw`.  Everything runs on the host.

mod host_tests;
mod mock_hw;
