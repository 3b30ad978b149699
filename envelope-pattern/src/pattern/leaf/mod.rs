mod array_pattern;
mod bool_pattern;
mod byte_string_pattern;
mod cbor_pattern;
mod date_pattern;
mod known_value_pattern;
mod leaf_pattern;
mod map_pattern;
mod null_pattern;
mod number_pattern;
mod tagged_pattern;
mod text_pattern;

pub use array_pattern::ArrayPattern;
pub use bool_pattern::BoolPattern;
pub use byte_string_pattern::ByteStringPattern;
pub use cbor_pattern::CBORPattern;
pub use date_pattern::DatePattern;
pub use known_value_pattern::KnownValuePattern;
pub use leaf_pattern::LeafPattern;
pub use map_pattern::MapPattern;
pub use null_pattern::NullPattern;
pub use number_pattern::{NumberComparison, NumberPattern};
pub use tagged_pattern::TaggedPattern;
pub use text_pattern::TextPattern;
