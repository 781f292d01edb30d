//! Request middleware. Currently only per-request trace identifiers.

pub mod trace;

pub use trace::Trace;
