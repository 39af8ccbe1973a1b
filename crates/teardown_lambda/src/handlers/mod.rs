pub mod cluster_probe;
pub mod cluster_teardown;
pub mod delete_eks;
pub mod eks_resources;
pub mod init;
pub mod respond;
pub mod s3_encrypt;
pub mod stack_resources;
