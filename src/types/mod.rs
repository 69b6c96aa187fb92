//! Data types shared by the string-constructor nodes.
//!
//! These types flow through the StreamWeave graph as `Arc<dyn Any>`.

mod format_dict;
mod format_policy;
#[cfg(test)]
mod format_policy_test;
mod format_request;

pub use format_dict::FormatDict;
pub use format_policy::FormatPolicy;
pub use format_request::FormatRequest;

/// Any value stored in a format-dict. Stringified when substituted.
pub type FormatValue = serde_json::Value;
