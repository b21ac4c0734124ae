//! Order pipeline (load, aggregate, write).
//!
//! Wires the loader, the two aggregators, and the output writer into the
//! single linear pass the tool performs. Everything here is synchronous;
//! one invocation is one complete, independent run.

pub mod loader;
pub mod run;
pub mod writer;

pub use loader::{load_orders, LoadedBatch};
pub use run::{run, RunReport};
pub use writer::{write_outputs, OutputPaths};
