use std::collections::HashMap;

use crate::model::ParseSettings;
use crate::parser::error::{ErrorList, Violation};
use crate::registry::OptionRegistry;

/// Run the post-scan checks: required presence and mutual exclusion.
///
/// Validation only reads the definition stamps; it never touches the bindings, so
/// running it is independent of how many format violations the scan recorded.
pub(crate) fn enforce(
    registry: &OptionRegistry<'_>,
    settings: &ParseSettings,
    errors: &mut ErrorList,
) {
    for entry in registry.entries() {
        if entry.spec.required() && entry.defined_at.is_none() {
            errors.record(entry.spec.identity(), Violation::Required);
        }
    }

    if !settings.enforce_mutual_exclusion {
        return;
    }

    // Group the defined members of each exclusive set, keeping declaration order so the
    // reported conflicts are stable across runs.
    let mut set_order: Vec<&str> = Vec::default();
    let mut members: HashMap<&str, Vec<usize>> = HashMap::default();

    for (index, entry) in registry.entries().iter().enumerate() {
        if entry.defined_at.is_none() {
            continue;
        }

        if let Some(set) = &entry.spec.exclusive_set {
            match members.get_mut(set.as_str()) {
                Some(existing) => existing.push(index),
                None => {
                    set_order.push(set.as_str());
                    members.insert(set.as_str(), vec![index]);
                }
            }
        }
    }

    for set in set_order {
        let indices = &members[set];

        if indices.len() < 2 {
            continue;
        }

        // Exactly one error per conflicted set, reported under the first-defined member.
        let first = indices
            .iter()
            .copied()
            .min_by_key(|index| registry.entries()[*index].defined_at)
            .unwrap_or_else(|| unreachable!("internal error - a conflicted set has members"));

        errors.record(
            registry.entries()[first].spec.identity(),
            Violation::MutualExclusion {
                set: set.to_string(),
            },
        );
    }
}
