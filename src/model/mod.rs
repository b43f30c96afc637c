//! Model Module
//!
//! Snapshots of server-side resources, built from protocol calls.
//!
//! ## Naming
//! - Corpus:     `<CORPUS>`
//! - Attribute:  `<CORPUS>.<attribute>`
//! - Subcorpus:  `<CORPUS>:<subcorpus>`
//!
//! Snapshots never talk to the server on their own: every method takes the
//! [`Client`](crate::Client) to use. To refresh one, fetch it again.

mod attribute;
mod corpus;
mod subcorpus;

pub use attribute::{AlignmentAttribute, PositionalAttribute, RegionContext, StructuralAttribute};
pub use corpus::Corpus;
pub use subcorpus::Subcorpus;
