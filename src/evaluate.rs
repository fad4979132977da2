use tracing::{debug, trace};

use crate::{Event, EventArgs, EventContext, Predicate};

/// Resolve the predicate's field through the event schema and compare it.
/// Undeclared, absent or mistyped fields make the predicate false.
pub(crate) fn test_predicate(predicate: &Predicate, event: &Event, args: &EventArgs) -> bool {
    let Some(property) = event.property(predicate.field()) else {
        trace!(field = predicate.field(), event = event.name(), "field not declared on event");
        return false;
    };
    let Some(value) = property.read(args) else {
        trace!(field = predicate.field(), "field absent from event arguments");
        return false;
    };
    predicate.comparator().compare(&value)
}

/// Conjunction of `predicates`; an empty list holds.
pub(crate) fn test_all(predicates: &[Predicate], event: &Event, args: &EventArgs) -> bool {
    predicates.iter().all(|p| test_predicate(p, event, args))
}

/// Replace each `${name}` in `text` with its evaluated value.
///
/// A single left-to-right pass: substituted values are not rescanned. An
/// evaluator returning `None` yields an empty string. Names with no
/// registered evaluator, and an unterminated `${`, are kept verbatim.
pub(crate) fn interpolate(text: &str, ctx: &EventContext<'_>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = &after[..end];
        match ctx.platform().expression(name) {
            Some(evaluator) => {
                if let Some(value) = evaluator(name, ctx) {
                    out.push_str(&value.to_string());
                }
            }
            None => {
                debug!(name, "no expression evaluator registered");
                out.push_str(&rest[start..start + end + 3]);
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
