//! The bytecode VM that drives pattern matching.
//!
//! Single-threaded and cooperative: the VM owns an explicit stack of
//! [`Thread`]s and pops/runs them one at a time, LIFO, so that the
//! instruction stream's own ordering (earlier `Split` arms, earlier
//! `PushAxis` children) fully determines result order. There is no
//! concurrency and nothing here blocks.

use std::collections::HashSet;

use gordian_envelope::{DigestProvider, Envelope};

use super::{CaptureMap, Greediness, Matcher, Path, Pattern};

/// A structural direction a [`PushAxis`](Instr::PushAxis) instruction
/// forks threads along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Subject,
    Assertion,
    Predicate,
    Object,
    Wrapped,
}

impl Axis {
    /// The envelopes reached from `env` along this axis, in the
    /// deterministic order the VM forks threads for them.
    fn children(&self, env: &Envelope) -> Vec<Envelope> {
        match self {
            Axis::Subject => {
                let subject = env.subject();
                if &subject == env { vec![] } else { vec![subject] }
            }
            Axis::Assertion => env.assertions(),
            Axis::Predicate => env.predicate().into_iter().collect(),
            Axis::Object => env.object().into_iter().collect(),
            Axis::Wrapped => env.try_unwrap().ok().into_iter().collect(),
        }
    }
}

/// One compiled instruction. See spec §4.4.1 for the semantics summary
/// this mirrors almost one-to-one.
#[derive(Debug, Clone)]
pub enum Instr {
    MatchPredicate(usize),
    MatchStructure(usize),
    Split(usize, usize),
    Jump(usize),
    PushAxis(Axis),
    Pop,
    Save,
    Accept,
    Search(usize),
    ExtendTraversal,
    CombineTraversal,
    NavigateSubject,
    NotMatch(usize),
    Repeat { pat_idx: usize, min: usize, max: Option<usize>, mode: Greediness },
    CaptureStart(String),
    CaptureEnd(String),
}

/// A compiled pattern: bytecode plus the literal-pattern pool the
/// `*(idx)` instructions index into.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub code: Vec<Instr>,
    pub literals: Vec<Pattern>,
}

/// A ceiling on total VM steps, guarding against pathological programs
/// (unbounded `Repeat` over a cyclic-looking but finite tree, etc).
/// per spec §5's "implementations should enforce a max instructions
/// ceiling" guidance.
const MAX_STEPS: usize = 1_000_000;
const MAX_REPEAT_EXPANSION: usize = 10_000;

#[derive(Debug, Clone)]
struct Thread {
    pc: usize,
    path: Path,
    saved_paths: Vec<Path>,
    captures: CaptureMap,
    capture_starts: std::collections::HashMap<String, Vec<usize>>,
}

impl Thread {
    fn new(root: Envelope) -> Self {
        Self {
            pc: 0,
            path: vec![root],
            saved_paths: Vec::new(),
            captures: CaptureMap::new(),
            capture_starts: std::collections::HashMap::new(),
        }
    }

    fn current(&self) -> &Envelope {
        self.path.last().expect("thread path is never empty")
    }

    fn snapshot(&self) -> (Path, CaptureMap) {
        (self.path.clone(), self.captures.clone())
    }
}

/// Runs `prog` against `root`, returning every matching `(path,
/// captures)` in deterministic order.
pub fn run(prog: &Program, root: &Envelope) -> Vec<(Path, CaptureMap)> {
    let mut results = Vec::new();
    let mut stack = vec![Thread::new(root.clone())];
    let mut steps = 0usize;

    while let Some(mut th) = stack.pop() {
        loop {
            steps += 1;
            if steps > MAX_STEPS {
                return results;
            }
            let Some(instr) = prog.code.get(th.pc) else { break };
            match instr {
                Instr::Accept => {
                    results.push(th.snapshot());
                    break;
                }
                Instr::Save => {
                    results.push(th.snapshot());
                    th.pc += 1;
                }
                Instr::Jump(addr) => th.pc = *addr,
                Instr::Split(a, b) => {
                    let mut sibling = th.clone();
                    sibling.pc = *b;
                    stack.push(sibling);
                    th.pc = *a;
                }
                Instr::MatchPredicate(idx) | Instr::MatchStructure(idx) => {
                    let pat = &prog.literals[*idx];
                    let cur = th.current().clone();
                    let produced = pat.paths_with_captures(&cur);
                    if produced.is_empty() {
                        break;
                    }
                    match fork_matches(&th, produced, th.pc + 1, &mut stack) {
                        Some(next) => th = next,
                        None => break,
                    }
                }
                Instr::NotMatch(idx) => {
                    let pat = &prog.literals[*idx];
                    let cur = th.current().clone();
                    if pat.matches(&cur) {
                        break;
                    }
                    th.pc += 1;
                }
                Instr::NavigateSubject => {
                    let subject = th.current().subject();
                    if &subject != th.current() {
                        th.path.push(subject);
                    }
                    th.pc += 1;
                }
                Instr::PushAxis(axis) => {
                    let cur = th.current().clone();
                    let children = axis.children(&cur);
                    if children.is_empty() {
                        break;
                    }
                    let next_pc = th.pc + 1;
                    for child in children.iter().skip(1).rev() {
                        let mut sibling = th.clone();
                        sibling.path.push(child.clone());
                        sibling.pc = next_pc;
                        stack.push(sibling);
                    }
                    th.path.push(children[0].clone());
                    th.pc = next_pc;
                }
                Instr::Pop => {
                    th.path.pop();
                    if th.path.is_empty() {
                        break;
                    }
                    th.pc += 1;
                }
                Instr::Search(idx) => {
                    let pat = &prog.literals[*idx];
                    let cur = th.current().clone();
                    let found = search_paths(pat, &cur);
                    if found.is_empty() {
                        break;
                    }
                    match fork_matches(&th, found, th.pc + 1, &mut stack) {
                        Some(next) => th = next,
                        None => break,
                    }
                }
                Instr::ExtendTraversal => {
                    let cur = th.current().clone();
                    th.saved_paths.push(th.path.clone());
                    th.path = vec![cur];
                    th.pc += 1;
                }
                Instr::CombineTraversal => {
                    let Some(mut base) = th.saved_paths.pop() else { break };
                    base.extend(th.path.into_iter().skip(1));
                    th.path = base;
                    th.pc += 1;
                }
                Instr::CaptureStart(name) => {
                    let start = th.path.len() - 1;
                    th.capture_starts.entry(name.clone()).or_default().push(start);
                    th.pc += 1;
                }
                Instr::CaptureEnd(name) => {
                    let Some(starts) = th.capture_starts.get_mut(name) else { break };
                    let Some(start) = starts.pop() else { break };
                    let end = th.path.len() - 1;
                    let captured = if start <= end {
                        th.path[start..=end].to_vec()
                    } else {
                        vec![th.current().clone()]
                    };
                    th.captures.entry(name.clone()).or_default().push(captured);
                    th.pc += 1;
                }
                Instr::Repeat { pat_idx, min, max, mode } => {
                    let pat = prog.literals[*pat_idx].clone();
                    let next_pc = th.pc + 1;
                    match fork_repeat(&th, &pat, *min, *max, *mode, next_pc, &mut stack) {
                        Some(next) => th = next,
                        None => break,
                    }
                }
            }
        }
    }
    results
}

/// Shared fork logic for `MatchPredicate`/`MatchStructure`/`Search`:
/// the first produced `(path, captures)` continues the current thread
/// (the "primary path" of spec §4.4.2's `MatchPredicate` semantics);
/// the rest are pushed as sibling threads. Named captures nested inside
/// the sub-pattern are distributed fairly: 1:1 if the count of produced
/// paths matches the count of captures under a name, otherwise every
/// capture attaches to the first path only.
fn fork_matches(
    th: &Thread,
    produced: Vec<(Path, CaptureMap)>,
    resume_pc: usize,
    stack: &mut Vec<Thread>,
) -> Option<Thread> {
    let base = th.path[..th.path.len() - 1].to_vec();
    let n = produced.len();
    let mut first = None;
    for (i, (sub_path, caps)) in produced.into_iter().enumerate() {
        let mut full = base.clone();
        full.extend(sub_path);
        let mut next = th.clone();
        next.path = full;
        next.pc = resume_pc;
        apply_captures(&mut next, &caps, i, n);
        if i == 0 {
            first = Some(next);
        } else {
            stack.push(next);
        }
    }
    first
}

fn apply_captures(th: &mut Thread, caps: &CaptureMap, index: usize, total: usize) {
    for (name, paths) in caps {
        let chosen = if paths.len() == total {
            paths.get(index).cloned()
        } else {
            (index == 0).then(|| paths.first().cloned()).flatten()
        };
        if let Some(p) = chosen {
            th.captures.entry(name.clone()).or_default().push(p);
        }
    }
}

/// Depth-first search over `env`'s structural tree for every subtree
/// matching `pat`, deduplicated by path (ordered digest list).
pub(crate) fn search_paths(pat: &Pattern, env: &Envelope) -> Vec<(Path, CaptureMap)> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    search_into(pat, env, &mut Vec::new(), &mut seen, &mut out);
    out
}

fn search_into(
    pat: &Pattern,
    env: &Envelope,
    prefix: &mut Path,
    seen: &mut HashSet<Vec<gordian_envelope::Digest>>,
    out: &mut Vec<(Path, CaptureMap)>,
) {
    prefix.push(env.clone());

    for (path, caps) in pat.paths_with_captures(env) {
        let mut full = prefix[..prefix.len() - 1].to_vec();
        full.extend(path);
        let key: Vec<_> = full.iter().map(|e| e.digest()).collect();
        if seen.insert(key) {
            out.push((full, caps));
        }
    }

    for child in env.structural_children() {
        search_into(pat, &child, prefix, seen, out);
    }

    prefix.pop();
}

/// The `Repeat` staircase algorithm of spec §4.4.2: builds layers of
/// `(env, path)` states reachable by `0, 1, 2, ...` applications of
/// `pat`, then forks threads trying the counts in the order `mode`
/// dictates.
fn fork_repeat(
    th: &Thread,
    pat: &Pattern,
    min: usize,
    max: Option<usize>,
    mode: Greediness,
    resume_pc: usize,
    stack: &mut Vec<Thread>,
) -> Option<Thread> {
    let base = th.path[..th.path.len() - 1].to_vec();
    let root = th.current().clone();

    let mut layers: Vec<Vec<Path>> = vec![vec![vec![root.clone()]]];
    let ceiling = max.unwrap_or(MAX_REPEAT_EXPANSION).min(MAX_REPEAT_EXPANSION);

    while layers.len() <= ceiling {
        let prev = layers.last().unwrap();
        let mut next_layer = Vec::new();
        let mut any_progress = false;
        for state_path in prev {
            let last = state_path.last().unwrap().clone();
            for sub_path in pat.paths(&last) {
                let new_last = sub_path.last().cloned().unwrap_or(last.clone());
                if new_last == last {
                    // no-progress rule: zero-width match doesn't advance.
                    continue;
                }
                any_progress = true;
                let mut extended = state_path.clone();
                extended.extend(sub_path);
                next_layer.push(extended);
            }
        }
        if !any_progress || next_layer.is_empty() {
            break;
        }
        layers.push(next_layer);
        if let Some(m) = max {
            if layers.len() > m {
                break;
            }
        }
    }

    let max_reachable = layers.len() - 1;
    let lo = min.max(0);
    let hi = max.unwrap_or(max_reachable).min(max_reachable);

    let mut counts: Vec<usize> = if hi >= lo.max(1) {
        (lo.max(1)..=hi).collect()
    } else {
        Vec::new()
    };
    let include_zero = min == 0;

    match mode {
        Greediness::Greedy => {
            counts.sort_unstable_by(|a, b| b.cmp(a));
            if include_zero {
                counts.push(0);
            }
        }
        Greediness::Lazy => {
            counts.sort_unstable();
            if include_zero {
                counts.insert(0, 0);
            }
        }
        Greediness::Possessive => {
            let best = counts.iter().max().copied();
            counts = match best {
                Some(b) => vec![b],
                None if include_zero => vec![0],
                None => vec![],
            };
        }
    }

    if counts.is_empty() {
        return None;
    }

    let mut first = None;
    for (i, count) in counts.iter().enumerate() {
        let state_path = &layers[*count][0.min(layers[*count].len() - 1)];
        let mut full = base.clone();
        full.extend(state_path.iter().cloned());
        let mut next = th.clone();
        next.path = full;
        next.pc = resume_pc;
        if i == 0 {
            first = Some(next);
        } else {
            stack.push(next);
        }
    }
    first
}
