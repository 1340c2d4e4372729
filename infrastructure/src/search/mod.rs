//! Search engine adapters

mod memory;

pub use memory::InMemorySearchEngine;
