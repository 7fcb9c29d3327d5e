pub mod char_range;
pub mod engine;
pub mod int_range;
pub mod render;

pub use crate::domain::model::{
    BuiltRange, OutputFormat, RangeKind, RangeSpec, RangeValue, RangeValues, RenderedRange,
};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
pub use char_range::{CharRange, CharRangeIter};
pub use int_range::{IntRange, IntRangeIter};
