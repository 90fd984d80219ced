#![allow(dead_code)]

pub mod builders;
pub mod mock_runtime;
pub mod strategies;

pub use builders::*;
pub use mock_runtime::*;
pub use strategies::*;
