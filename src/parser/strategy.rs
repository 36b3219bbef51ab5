use crate::model::{Arity, ParseSettings};
use crate::parser::error::{ErrorList, Violation};
use crate::registry::OptionRegistry;
use crate::scanner::TokenCursor;

/// Handle a `--name` / `--name=value` token.
pub(crate) fn match_long<'t>(
    registry: &mut OptionRegistry<'_>,
    settings: &ParseSettings,
    name: &str,
    inline: Option<&'t str>,
    cursor: &mut TokenCursor<'t>,
    errors: &mut ErrorList,
) {
    match registry.resolve_long(name) {
        Some(index) => bind_resolved(registry, index, inline, cursor, errors),
        None => {
            if !settings.ignore_unknown {
                errors.record(
                    name.to_string(),
                    Violation::Format {
                        detail: "unknown option.".to_string(),
                    },
                );
            }
        }
    }
}

/// Handle a `-xyz` cluster token.
///
/// Leading boolean short names are peeled off one by one.  The first value-bearing
/// short name consumes the verbatim remainder of the cluster as its inline value (if
/// any) and ends the cluster.
pub(crate) fn match_short<'t>(
    registry: &mut OptionRegistry<'_>,
    settings: &ParseSettings,
    cluster: &'t str,
    cursor: &mut TokenCursor<'t>,
    errors: &mut ErrorList,
) {
    let mut characters = cluster.char_indices();

    while let Some((offset, short)) = characters.next() {
        let index = match registry.resolve_short(short) {
            Some(index) => index,
            None => {
                if settings.ignore_unknown {
                    continue;
                }

                // The remainder could be an attached value for the unknown name, so
                // interpreting further letters would only compound the error.
                errors.record(
                    short.to_string(),
                    Violation::Format {
                        detail: "unknown option.".to_string(),
                    },
                );
                return;
            }
        };

        if matches!(registry.spec(index).arity(), Arity::Boolean) {
            registry.mark_matched(index);
            registry.mark_defined(index);
            continue;
        }

        // Value-bearing: the remainder (ex: the `5` of `-n5`) is the inline value.
        let remainder = &cluster[offset + short.len_utf8()..];
        let inline = if remainder.is_empty() {
            None
        } else {
            Some(remainder)
        };
        bind_resolved(registry, index, inline, cursor, errors);
        return;
    }
}

/// Collect and bind the value(s) of a resolved, value-bearing or boolean option.
fn bind_resolved<'t>(
    registry: &mut OptionRegistry<'_>,
    index: usize,
    inline: Option<&'t str>,
    cursor: &mut TokenCursor<'t>,
    errors: &mut ErrorList,
) {
    let spec = registry.spec(index);
    let name = spec.identity();
    let arity = spec.arity();

    let values: Vec<&str> = match arity {
        Arity::Boolean => {
            if inline.is_some() {
                errors.record(
                    name,
                    Violation::Format {
                        detail: "takes no value.".to_string(),
                    },
                );
            } else {
                registry.mark_matched(index);
                registry.mark_defined(index);
            }

            return;
        }
        Arity::Scalar => match inline.or_else(|| cursor.take_value()) {
            Some(value) => vec![value],
            None => {
                errors.record(
                    name,
                    Violation::Format {
                        detail: "missing value.".to_string(),
                    },
                );
                return;
            }
        },
        Arity::DelimitedList(separator) => match inline.or_else(|| cursor.take_value()) {
            Some(value) => value.split(separator).collect(),
            None => {
                errors.record(
                    name,
                    Violation::Format {
                        detail: "missing value.".to_string(),
                    },
                );
                return;
            }
        },
        Arity::Array => {
            let mut values: Vec<&str> = inline.into_iter().collect();
            values.extend(cursor.collect_values());

            if values.is_empty() {
                errors.record(
                    name,
                    Violation::Format {
                        detail: "missing values.".to_string(),
                    },
                );
                return;
            }

            values
        }
    };

    match registry.bind(index, &values) {
        Ok(()) => registry.mark_defined(index),
        Err(error) => errors.record(
            name,
            Violation::Format {
                detail: error.to_string(),
            },
        ),
    }
}
