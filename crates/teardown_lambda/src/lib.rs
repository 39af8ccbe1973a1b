//! AWS-oriented adapters and handlers for the demo-stack teardown Lambdas.
//!
//! This crate owns runtime integration details (Lambda entry points, AWS SDK
//! adapters, and the CloudFormation callback transport) and exposes a single
//! runtime module boundary for the shared contract and sequencing primitives.

pub mod adapters;
pub mod aws;
pub mod config;
pub mod handlers;
pub mod runtime;
