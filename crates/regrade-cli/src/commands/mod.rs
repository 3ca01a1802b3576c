pub mod reconcile;
pub mod resolve;
pub mod validate;
