mod assertions_pattern;
mod digest_pattern;
mod node_pattern;
mod object_pattern;
mod obscured_pattern;
mod predicate_pattern;
mod structure_pattern;
mod subject_pattern;
mod wrapped_pattern;

pub use assertions_pattern::AssertionsPattern;
pub use digest_pattern::DigestPattern;
pub use node_pattern::NodePattern;
pub use object_pattern::ObjectPattern;
pub use obscured_pattern::ObscuredPattern;
pub use predicate_pattern::PredicatePattern;
pub use structure_pattern::StructurePattern;
pub use subject_pattern::SubjectPattern;
pub use wrapped_pattern::WrappedPattern;
