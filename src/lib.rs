pub mod error;
pub mod flatten;
pub mod handle;
pub mod proof;
pub mod validate;
