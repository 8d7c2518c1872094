//! Running snippets through local interpreters and compilers

pub mod dispatcher;
pub mod errors;
mod process;
pub mod toolchain;

pub use dispatcher::{ExecutionDispatcher, ExecutionReport};
pub use errors::ExecutionError;
pub use toolchain::{ExecutionOutput, Toolchain, java_class_name};
