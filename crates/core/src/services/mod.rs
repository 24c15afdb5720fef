pub mod bootstrap;
pub mod pipeline;
pub mod provisioner;
pub mod resolver;
pub mod staging;
pub mod verify;
