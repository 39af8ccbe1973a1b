//! Shared custom-resource teardown primitives.
//!
//! This crate owns the CloudFormation custom-resource contract and the
//! best-effort teardown sequencing behavior. It intentionally excludes AWS SDK
//! and Lambda runtime concerns; those live in `crates/teardown_lambda`.

pub mod contract;
pub mod logging;
pub mod sequencer;
