//! Text widgets bound to variables
//!
//! A [`TextBinding`] renders a format template with the current values of its
//! bindings. Placeholders are `[1]`, `[2]`, ... and refer to bindings in
//! order. When the rendered text changes, the owning widget's `change` action
//! runs once on the same update.

use tracing::trace;

use crate::action::{hash16, ActionName};
use crate::context::EngineContext;
use crate::variable::Variable;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBinding {
    format: String,
    bindings: Vec<String>,
    text: String,
    changed: bool,
}

impl TextBinding {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            ..Self::default()
        }
    }

    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.bindings.push(binding.into());
        self
    }

    pub fn with_bindings<I, S>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bindings.extend(bindings.into_iter().map(Into::into));
        self
    }

    /// Initial text, shown before the first update; does not count as a change
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn bindings(&self) -> &[String] {
        &self.bindings
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the displayed text; returns whether it differs from before
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.changed = true;
        true
    }

    /// Clear and return the pending change flag
    fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Render the format with the current binding values
    pub fn render(&self, ctx: &dyn EngineContext) -> String {
        let values: Vec<String> = self
            .bindings
            .iter()
            .map(|b| ctx.resolve_string(&Variable::String(b.clone())))
            .collect();
        format_bindings(&self.format, &values)
    }
}

/// Substitute `[n]` (1-based) placeholders in `format` with `values`
///
/// An empty format joins the values. Placeholders without a value and
/// brackets that are not placeholders are kept verbatim.
pub fn format_bindings(format: &str, values: &[String]) -> String {
    if format.is_empty() {
        return values.concat();
    }
    let mut out = String::with_capacity(format.len());
    let mut rest = format;
    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after.find(']').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let value = values.get(index.checked_sub(1)?)?;
            Some((value, close))
        });
        match placeholder {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('[');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Refresh a text widget and fire its `change` action if the text changed
///
/// Hidden widgets are skipped entirely. Returns the `change` action's result,
/// or `true` when nothing ran.
pub fn update_text(ctx: &mut dyn EngineContext, id: &str) -> bool {
    let rendered = {
        let Some(widget) = ctx.widget(id) else {
            trace!(id, "update_text: widget not found");
            return true;
        };
        if !widget.is_visible() {
            return true;
        }
        let Some(binding) = widget.text() else {
            return true;
        };
        if binding.bindings().is_empty() {
            None
        } else {
            Some(binding.render(&*ctx))
        }
    };

    let Some(widget) = ctx.widget_mut(id) else {
        return true;
    };
    let Some(binding) = widget.text_mut() else {
        return true;
    };
    if let Some(text) = rendered {
        binding.set_text(text);
    }
    if !binding.take_changed() {
        return true;
    }
    let change = widget.action(hash16(ActionName::CHANGE));
    match change {
        Some(action) => action.execute(ctx),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_format_placeholders() {
        let values = strings(&["12", "40"]);
        assert_eq!(format_bindings("HP: [1]/[2]", &values), "HP: 12/40");
        assert_eq!(format_bindings("[2][1]", &values), "4012");
    }

    #[test]
    fn test_format_keeps_unknown_brackets() {
        let values = strings(&["x"]);
        assert_eq!(format_bindings("[0] [3] [a] [1]", &values), "[0] [3] [a] x");
        assert_eq!(format_bindings("open [", &values), "open [");
    }

    #[test]
    fn test_empty_format_joins_values() {
        assert_eq!(format_bindings("", &strings(&["a", "b"])), "ab");
    }

    #[test]
    fn test_set_text_reports_change_once() {
        let mut text = TextBinding::new("[1]");
        assert!(text.set_text("a"));
        assert!(!text.set_text("a"));
        assert!(text.take_changed());
        assert!(!text.take_changed());
    }
}
