//! 数据模型

mod context;
mod descriptor;
mod match_array;

pub use context::PageContext;
pub use descriptor::{Extraction, MatcherInfo, Reliability};
pub use match_array::{MatchArray, Pattern, Scan};
