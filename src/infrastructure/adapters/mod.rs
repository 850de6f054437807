//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod catalog;
pub mod llm;
pub mod speech;

pub use catalog::*;
pub use llm::*;
pub use speech::*;
