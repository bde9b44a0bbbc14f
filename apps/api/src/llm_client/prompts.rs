// Cross-cutting prompt utilities.
// Task-specific templates live in ai::prompts; this file holds the helpers they share.

/// Cuts `text` to at most `budget` characters (not bytes).
/// Returns the kept prefix and whether anything was dropped.
pub fn truncate_chars(text: &str, budget: usize) -> (&str, bool) {
    match text.char_indices().nth(budget) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

/// Substitutes `{key}` placeholders in a single left-to-right pass.
///
/// Values are never rescanned, so user text containing `{job_description}`
/// or similar stays verbatim. Unknown placeholders are left in place.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + values.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, close))
        });
        match substituted {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_short_text_untouched() {
        assert_eq!(truncate_chars("hello", 10), ("hello", false));
        assert_eq!(truncate_chars("hello", 5), ("hello", false));
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        let (kept, truncated) = truncate_chars("résumé écrit", 6);
        assert_eq!(kept, "résumé");
        assert!(truncated);
    }

    #[test]
    fn test_fill_template_replaces_known_keys() {
        let out = fill_template(
            "Role: {job_title}\nJD: {job_description}",
            &[("job_title", "Engineer"), ("job_description", "Build things")],
        );
        assert_eq!(out, "Role: Engineer\nJD: Build things");
    }

    #[test]
    fn test_fill_template_does_not_rescan_values() {
        let out = fill_template(
            "A={a} B={b}",
            &[("a", "{b}"), ("b", "second")],
        );
        assert_eq!(out, "A={b} B=second");
    }

    #[test]
    fn test_fill_template_keeps_json_braces_and_unknown_keys() {
        let out = fill_template(
            "{\n  \"subject\": \"...\"\n} {unknown} {name}",
            &[("name", "Ada")],
        );
        assert_eq!(out, "{\n  \"subject\": \"...\"\n} {unknown} Ada");
    }
}
