//! Helpers shared by the `strata_config` test suites.

pub mod env;
