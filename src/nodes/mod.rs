//! StreamWeave nodes for building format-dicts and formatting strings.

mod dict_add_any;
#[cfg(test)]
mod dict_add_any_test;
mod dict_add_string;
#[cfg(test)]
mod dict_add_string_test;
mod dict_extract;
mod dict_from_text;
mod dict_preview;
#[cfg(test)]
mod dict_preview_test;
mod formatter_node;
mod validate_keys;
#[cfg(test)]
mod validate_keys_test;

pub use dict_add_any::DictAddAnyNode;
pub use dict_add_string::DictAddStringNode;
pub use dict_extract::DictExtractStringNode;
pub use dict_from_text::{DictFromTextInput, DictFromTextNode};
pub use dict_preview::DictPreviewNode;
pub use formatter_node::FormatterNode;
pub use validate_keys::ValidateKeysNode;
