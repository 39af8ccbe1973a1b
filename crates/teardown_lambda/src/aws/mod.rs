//! AWS SDK and HTTP-backed implementations of the adapter traits.
//!
//! The adapter traits are synchronous; implementations bridge onto the Lambda
//! runtime's Tokio executor with `block_in_place`, which requires the
//! multi-threaded runtime flavor the binaries use.

pub mod autoscaling;
pub mod callback;
pub mod cloudformation;
pub mod ecr;
pub mod eks;
pub mod eks_auth;
pub mod events;
pub mod iam;
pub mod kubernetes;
pub mod lambda;
pub mod s3;

pub(crate) fn block_on<F>(future: F) -> F::Output
where
    F: std::future::Future,
{
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
