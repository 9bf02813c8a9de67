//! Shared test utilities for bay-db unit tests.
