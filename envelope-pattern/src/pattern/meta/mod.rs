mod and_pattern;
mod any_pattern;
mod capture_pattern;
mod meta_pattern;
mod none_pattern;
mod not_pattern;
mod or_pattern;
mod repeat_pattern;
mod search_pattern;
mod sequence_pattern;

pub use and_pattern::AndPattern;
pub use any_pattern::AnyPattern;
pub use capture_pattern::CapturePattern;
pub use meta_pattern::MetaPattern;
pub use none_pattern::NonePattern;
pub use not_pattern::NotPattern;
pub use or_pattern::OrPattern;
pub use repeat_pattern::RepeatPattern;
pub use search_pattern::SearchPattern;
pub use sequence_pattern::SequencePattern;
