//! Request middleware applied in front of every route.

pub mod method_guard;

pub use method_guard::retrieval_only;
