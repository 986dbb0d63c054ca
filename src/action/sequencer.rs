//! Final ordering of resolved steps
//!
//! Resolved action-group steps are handed to a [`StepSequencer`] which turns
//! the keyed set into an ordered sequence. Steps without a link keep their
//! declaration order; linked steps are placed next to their target.

use super::{ActionStep, ORDER_BEFORE};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Orders a keyed set of steps into an executable sequence
pub trait StepSequencer {
    /// Produce the ordered steps. `is_action_group` marks an action-group
    /// expansion as opposed to a top-level test body.
    fn sequence(
        &self,
        steps: IndexMap<String, ActionStep>,
        is_action_group: bool,
    ) -> Vec<ActionStep>;
}

/// Keeps steps in the order they were declared, ignoring links
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationOrder;

impl StepSequencer for DeclarationOrder {
    fn sequence(
        &self,
        steps: IndexMap<String, ActionStep>,
        _is_action_group: bool,
    ) -> Vec<ActionStep> {
        steps.into_values().collect()
    }
}

/// Places each linked step immediately before or after its target
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedStepSequencer;

impl StepSequencer for LinkedStepSequencer {
    fn sequence(
        &self,
        steps: IndexMap<String, ActionStep>,
        is_action_group: bool,
    ) -> Vec<ActionStep> {
        debug!(
            "Sequencing {} steps (action group: {})",
            steps.len(),
            is_action_group
        );

        let (mut ordered, mut pending): (Vec<ActionStep>, Vec<ActionStep>) = steps
            .into_values()
            .partition(|step| step.linked_action.is_none());

        // Links may point at other linked steps, so keep placing until a
        // full pass makes no progress.
        loop {
            let before = pending.len();
            let mut unplaced = Vec::with_capacity(pending.len());

            for step in pending {
                match placement(&ordered, &step) {
                    Some(index) => ordered.insert(index, step),
                    None => unplaced.push(step),
                }
            }

            pending = unplaced;
            if pending.is_empty() || pending.len() == before {
                break;
            }
        }

        for step in pending {
            warn!(
                "Linked action '{}' for step '{}' not found, appending step at the end",
                step.linked_action.as_deref().unwrap_or_default(),
                step.step_key
            );
            ordered.push(step);
        }

        ordered
    }
}

/// Index at which `step` should be inserted, or `None` if its target is not placed yet
fn placement(ordered: &[ActionStep], step: &ActionStep) -> Option<usize> {
    let target = step.linked_action.as_deref()?;
    let position = ordered.iter().position(|s| s.step_key == target)?;

    if step.order_offset <= ORDER_BEFORE {
        Some(position)
    } else {
        Some(position + 1)
    }
}
