use std::collections::HashMap;
use std::fmt;

/// A single way in which an option (or the positional list) failed the parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The option was present but its value(s) were malformed, missing, or superfluous.
    Format {
        /// What exactly went wrong, in user-presentable prose.
        detail: String,
    },
    /// The option was declared required but never appeared.
    Required,
    /// The option's mutually exclusive set has more than one member present.
    MutualExclusion {
        /// The identifier of the violated set.
        set: String,
    },
}

/// Every violation recorded against a single option during one parse.
///
/// Parsing is exhaustive: the scan never stops at the first problem, so a single
/// `ParsingError` may carry multiple violations and a single parse may produce
/// errors for multiple options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingError {
    name: String,
    violations: Vec<Violation>,
}

impl ParsingError {
    /// The name the option is reported under (long name when declared, else short).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The violations, in the order they were recorded.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Whether any recorded violation is a format problem.
    pub fn violates_format(&self) -> bool {
        self.violations
            .iter()
            .any(|violation| matches!(violation, Violation::Format { .. }))
    }

    /// Whether the option was required but absent.
    pub fn violates_required(&self) -> bool {
        self.violations
            .iter()
            .any(|violation| matches!(violation, Violation::Required))
    }

    /// Whether the option's mutually exclusive set was violated.
    pub fn violates_mutual_exclusion(&self) -> bool {
        self.violations
            .iter()
            .any(|violation| matches!(violation, Violation::MutualExclusion { .. }))
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{name}':", name = self.name)?;

        for violation in &self.violations {
            match violation {
                Violation::Format { detail } => write!(f, " {detail}")?,
                Violation::Required => write!(f, " option is required.")?,
                Violation::MutualExclusion { set } => {
                    write!(f, " conflicts within the set '{set}'.")?;
                }
            }
        }

        Ok(())
    }
}

impl std::error::Error for ParsingError {}

/// Accumulates violations during a parse, merging by option name.
#[derive(Default)]
pub(crate) struct ErrorList {
    // Names in first-recorded order; the map carries the violations.
    order: Vec<String>,
    violations: HashMap<String, Vec<Violation>>,
}

impl ErrorList {
    pub(crate) fn record(&mut self, name: String, violation: Violation) {
        match self.violations.get_mut(&name) {
            Some(existing) => existing.push(violation),
            None => {
                self.order.push(name.clone());
                self.violations.insert(name, vec![violation]);
            }
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn into_errors(mut self) -> Vec<ParsingError> {
        self.order
            .into_iter()
            .map(|name| {
                let violations = self
                    .violations
                    .remove(&name)
                    .unwrap_or_else(|| unreachable!("internal error - recorded name must carry violations"));
                ParsingError { name, violations }
            })
            .collect()
    }
}
