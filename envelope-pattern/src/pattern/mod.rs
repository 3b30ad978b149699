//! The pattern AST, its bytecode compiler, and the backtracking VM that
//! runs the compiled program against an envelope tree.

mod greediness;
pub mod leaf;
mod matcher;
pub mod meta;
mod pattern_impl;
pub mod structure;
pub mod vm;

pub use greediness::{Greediness, Quantifier};
pub use matcher::{CaptureMap, Matcher, Path};
pub use pattern_impl::Pattern;

use vm::Instr;

/// Implemented by every pattern node that knows how to emit its own
/// bytecode into a shared `(code, literals)` buffer.
pub trait Compilable {
    fn compile(&self, code: &mut Vec<Instr>, literals: &mut Vec<Pattern>);
}

/// Compiles `pattern` as a single atomic instruction: the pattern itself
/// is pushed into the literal pool and a `MatchPredicate` is emitted
/// referencing it. Used by every leaf/structure pattern that has no
/// internal control flow of its own.
pub fn compile_as_atomic(
    pattern: &Pattern,
    code: &mut Vec<Instr>,
    literals: &mut Vec<Pattern>,
) {
    let idx = literals.len();
    literals.push(pattern.clone());
    code.push(Instr::MatchPredicate(idx));
}
