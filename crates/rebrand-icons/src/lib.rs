#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod convert;
pub mod error;
pub mod guide;
pub mod ico;
pub mod placeholder;
pub mod plan;
pub mod resize;
pub mod source;
pub mod svg;

pub use convert::{ConvertOptions, ConvertReport, Fit, apply_plan, copy_to_build};
pub use error::{Error, Result};
pub use guide::ReplacementGuide;
pub use plan::{IconPlan, IconTarget};
pub use source::load_icon;
