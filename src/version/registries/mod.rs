//! Package index implementations

mod unpkg;

pub use unpkg::UnpkgRegistry;
