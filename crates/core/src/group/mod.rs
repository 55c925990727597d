// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Composition groups: sequential, parallel, race, deadline, repeat

pub mod deadline;
pub mod parallel;
pub mod race;
pub mod repeat;
pub mod sequential;

pub use deadline::DeadlineGroup;
pub use parallel::ParallelGroup;
pub use race::RaceGroup;
pub use repeat::RepeatCommand;
pub use sequential::SequentialGroup;

use crate::command::{Command, InterruptionBehavior, ResourceSet};
use crate::error::CommandError;
use std::collections::BTreeMap;

/// A group's requirement set is the union of its children's.
pub(crate) fn union_requirements<'a>(
    commands: impl Iterator<Item = &'a Box<dyn Command>>,
) -> ResourceSet {
    let mut union = ResourceSet::new();
    for command in commands {
        union.extend(command.requirements().iter().cloned());
    }
    union
}

/// A group yields to incoming commands only if every child does; one
/// `CancelIncoming` child makes the whole group refuse interruption.
pub(crate) fn aggregate_behavior<'a>(
    commands: impl Iterator<Item = &'a Box<dyn Command>>,
) -> InterruptionBehavior {
    for command in commands {
        if command.interruption_behavior() == InterruptionBehavior::CancelIncoming {
            return InterruptionBehavior::CancelIncoming;
        }
    }
    InterruptionBehavior::CancelSelf
}

/// Members of a parallel-style group run simultaneously, so their
/// requirement sets must be disjoint.
pub(crate) fn check_disjoint<'a>(
    commands: impl Iterator<Item = &'a Box<dyn Command>>,
) -> Result<(), CommandError> {
    let mut seen: BTreeMap<&crate::command::ResourceId, usize> = BTreeMap::new();
    for command in commands {
        for resource in command.requirements() {
            let count = seen.entry(resource).or_insert(0);
            *count += 1;
            if *count > 1 {
                return Err(CommandError::SharedRequirement(resource.clone()));
            }
        }
    }
    Ok(())
}
