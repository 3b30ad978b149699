use std::collections::HashMap;
use std::fmt::Debug;

use gordian_envelope::Envelope;

/// A non-empty sequence of envelopes `[root, ..., leaf]`, each reachable
/// from its predecessor by one structural step.
pub type Path = Vec<Envelope>;

/// Named captures collected alongside a match: each name maps to the
/// paths captured under it, in the order the VM produced them.
pub type CaptureMap = HashMap<String, Vec<Path>>;

/// Implemented by every pattern type, atomic or compound. `paths` is the
/// primary query; `paths_with_captures` additionally reports any named
/// captures nested within the pattern (empty for patterns with none).
pub trait Matcher: Debug + Clone {
    fn paths(&self, envelope: &Envelope) -> Vec<Path>;

    fn paths_with_captures(
        &self,
        envelope: &Envelope,
    ) -> Vec<(Path, CaptureMap)> {
        self.paths(envelope)
            .into_iter()
            .map(|path| (path, CaptureMap::new()))
            .collect()
    }

    fn matches(&self, envelope: &Envelope) -> bool {
        !self.paths(envelope).is_empty()
    }

    /// Whether this pattern needs the bytecode VM to evaluate (it forks,
    /// backtracks, or navigates), as opposed to a single direct check
    /// against the current envelope. Used to skip compiling a `Program`
    /// for the common case of a bare leaf/structure pattern.
    fn is_complex(&self) -> bool { false }
}
