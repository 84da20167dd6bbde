//! Ordered TikZ option lists.
//!
//! LaTeX option lists are order-sensitive for some packages, so `Style`
//! preserves insertion order instead of using a hash map.

/// An ordered key/value option set for TikZ commands.
///
/// A key without a value (or with an empty value) renders as a bare flag,
/// e.g. `dashed,`. Updating an existing key keeps its original position.
///
/// # Example
///
/// ```
/// use tikzgen::Style;
///
/// let style = Style::new()
///     .with("fill", "red!40!white")
///     .with("fill opacity", "0.2")
///     .with_flag("dashed");
/// assert_eq!(style.render(), "fill=red!40!white,fill opacity=0.2,dashed,");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: Vec<(String, Option<String>)>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, appending it if absent.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.insert(key.into(), Some(value.into()));
        self
    }

    /// Set `key` as a flag-only option (no `=value` part).
    pub fn flag(&mut self, key: impl Into<String>) -> &mut Self {
        self.insert(key.into(), None);
        self
    }

    /// Builder form of [`Style::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`Style::flag`].
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.flag(key);
        self
    }

    fn insert(&mut self, key: String, value: Option<String>) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a key. The outer `Option` is presence, the inner is the
    /// value (`None` for flag-only options).
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref())
    }

    /// Number of options.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no options are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over options in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// A copy with `key` removed, other options untouched.
    pub(crate) fn without(&self, key: &str) -> Style {
        Style {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| k != key)
                .cloned()
                .collect(),
        }
    }

    /// Render the comma-terminated option list: `key,` for flags,
    /// `key=value,` otherwise, in insertion order. An empty style renders
    /// to the empty string.
    pub fn render(&self) -> String {
        let mut txt = String::new();
        for (key, value) in &self.entries {
            match value.as_deref() {
                None | Some("") => {
                    txt.push_str(key);
                    txt.push(',');
                }
                Some(value) => {
                    txt.push_str(key);
                    txt.push('=');
                    txt.push_str(value);
                    txt.push(',');
                }
            }
        }
        txt
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Style {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = Style::new();
        for (key, value) in iter {
            style.set(key, value);
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_renders_empty() {
        assert_eq!(Style::new().render(), "");
    }

    #[test]
    fn keys_render_in_insertion_order() {
        let style = Style::new()
            .with("color", "red!60!black")
            .with("fill", "green")
            .with("fill opacity", "0.1");
        assert_eq!(
            style.render(),
            "color=red!60!black,fill=green,fill opacity=0.1,"
        );
    }

    #[test]
    fn flags_render_bare() {
        let style = Style::new().with_flag("dashed").with("thick", "");
        // An empty value is treated the same as no value.
        assert_eq!(style.render(), "dashed,thick,");
    }

    #[test]
    fn update_keeps_position() {
        let style = Style::new()
            .with("fill", "red")
            .with_flag("dashed")
            .with("fill", "blue");
        assert_eq!(style.render(), "fill=blue,dashed,");
        assert_eq!(style.len(), 2);
    }

    #[test]
    fn without_drops_only_named_key() {
        let style = Style::new()
            .with("arrows", "->")
            .with("color", "gray");
        let trimmed = style.without("arrows");
        assert_eq!(trimmed.render(), "color=gray,");
        // Original is untouched.
        assert_eq!(style.get("arrows"), Some(Some("->")));
    }

    #[test]
    fn from_iterator_collects_pairs() {
        let style: Style = [("fill", "red"), ("draw", "black")].into_iter().collect();
        assert_eq!(style.render(), "fill=red,draw=black,");
    }
}
