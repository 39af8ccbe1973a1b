pub mod callback;
pub mod cluster;
pub mod events;
pub mod functions;
pub mod object_store;
pub mod pods;
pub mod registry;
pub mod roles;
pub mod scaling;
pub mod stacks;
