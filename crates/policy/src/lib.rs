pub mod permissions;
pub mod transform;

pub use permissions::{check_access, AccessDecision};
pub use transform::{ArgsTransform, FnTransform, NoopTransform};
