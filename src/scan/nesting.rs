//! Nesting validator: checks one file's marker sequence for pairing defects.
//!
//! Consumes the ordered event sequence for a single file and maintains a
//! stack of open regions. Emits nested-pair observations when a region opens
//! inside another, and structural errors for the three ways pairing can go
//! wrong: an END with nothing open, an END closing the wrong region, and a
//! START still open at end of file.
//!
//! The stack is a local value of each `validate` call, so files can be
//! processed in parallel with no shared state.

use super::{MarkerEvent, MarkerKind, NestedPair, StructuralError};

/// An open START awaiting its matching END.
#[derive(Debug, Clone)]
struct RegionFrame {
    tag: String,
    line: usize,
    /// The original Start event, kept so nested pairs can snapshot the
    /// outer frame by value.
    event: MarkerEvent,
}

/// Outcome of validating one file's marker sequence.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub nested_pairs: Vec<NestedPair>,
    pub errors: Vec<StructuralError>,
}

/// Validate the marker event sequence of a single file.
///
/// Events must be in file order (the tokenizer guarantees this). Never
/// fails: malformed input degrades to zero or more `StructuralError`
/// entries.
pub fn validate(events: &[MarkerEvent]) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    let mut stack: Vec<RegionFrame> = Vec::new();

    for event in events {
        match event.kind {
            MarkerKind::Start => {
                if let Some(top) = stack.last() {
                    // Depth counts every open region plus the one opening
                    // now, so one level inside one region is depth 2.
                    outcome.nested_pairs.push(NestedPair {
                        outer: top.event.clone(),
                        inner: event.clone(),
                        depth: stack.len() + 1,
                    });
                }
                // Push unconditionally: a tag duplicating an already-open
                // tag nests like any other.
                stack.push(RegionFrame {
                    tag: event.tag.clone(),
                    line: event.line,
                    event: event.clone(),
                });
            }
            MarkerKind::End => match stack.pop() {
                None => {
                    outcome.errors.push(StructuralError::UnmatchedEnd {
                        tag: event.tag.clone(),
                        line: event.line,
                    });
                }
                Some(top) => {
                    if top.tag != event.tag {
                        // Pop anyway: assume the END was meant to close the
                        // innermost region even if misnamed, keeping later
                        // depth accounting accurate instead of cascading.
                        outcome.errors.push(StructuralError::MismatchedEnd {
                            expected_tag: top.tag,
                            got_tag: event.tag.clone(),
                            start_line: top.line,
                            end_line: event.line,
                        });
                    }
                }
            },
        }
    }

    // Leftover frames never closed; report outermost first (push order).
    for frame in stack {
        outcome.errors.push(StructuralError::UnclosedStart {
            tag: frame.tag,
            line: frame.line,
        });
    }

    outcome
}
