//! Placeholder substitution for `{{key}}` templates.
//!
//! Rendering is a single left-to-right scan: substituted values are never re-scanned, so a
//! fact value that itself contains `{{...}}` is inserted verbatim and repeated renders of
//! the same input always agree.

use docket_types::Template;
use indexmap::IndexMap;

/// Collected fact answers keyed by fact/placeholder name, in entry order.
pub type FactMap = IndexMap<String, String>;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Marker substituted for a placeholder with no usable fact value.
pub fn missing_marker(key: &str) -> String {
    format!("[MISSING {}]", key.to_uppercase())
}

/// True when `facts` holds a non-empty value for `key`.
pub fn has_fact(facts: &FactMap, key: &str) -> bool {
    facts.get(key).is_some_and(|value| !value.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

fn segments(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut remainder = content;

    while let Some(start) = remainder.find(OPEN) {
        let after_start = &remainder[start + OPEN.len()..];
        let Some(end) = after_start.find(CLOSE) else {
            break;
        };
        let inner = &after_start[..end];
        // "{{a {{b}}" binds the innermost opener; everything before it stays literal.
        let (mut literal_end, mut key) = match inner.rfind(OPEN) {
            Some(nested) => (start + OPEN.len() + nested, &inner[nested + OPEN.len()..]),
            None => (start, inner),
        };
        // In "{{{name}}" the token is the last two braces; extra openers are literal text.
        let extra_braces = key.len() - key.trim_start_matches('{').len();
        literal_end += extra_braces;
        key = &key[extra_braces..];

        if key.is_empty() || key.contains('}') {
            segments.push(Segment::Literal(&remainder[..start + OPEN.len() + end + CLOSE.len()]));
        } else {
            if literal_end > 0 {
                segments.push(Segment::Literal(&remainder[..literal_end]));
            }
            segments.push(Segment::Placeholder(key));
        }
        remainder = &after_start[end + CLOSE.len()..];
    }

    if !remainder.is_empty() {
        segments.push(Segment::Literal(remainder));
    }
    segments
}

/// Distinct placeholder keys in first-occurrence order.
pub fn placeholder_keys(content: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for segment in segments(content) {
        if let Segment::Placeholder(key) = segment
            && !keys.iter().any(|existing| existing == key)
        {
            keys.push(key.to_string());
        }
    }
    keys
}

/// Substitutes every `{{key}}` in `content`.
///
/// Keys match case-sensitively on the exact token text. A key with no fact, or with an
/// empty fact, renders as `[MISSING <KEY>]`. Facts that no placeholder mentions are ignored.
pub fn render(content: &str, facts: &FactMap) -> String {
    let mut rendered = String::with_capacity(content.len());
    for segment in segments(content) {
        match segment {
            Segment::Literal(text) => rendered.push_str(text),
            Segment::Placeholder(key) => match facts.get(key) {
                Some(value) if !value.is_empty() => rendered.push_str(value),
                _ => rendered.push_str(&missing_marker(key)),
            },
        }
    }
    rendered
}

/// Renders a catalog template's content against `facts`.
pub fn render_template(template: &Template, facts: &FactMap) -> String {
    render(&template.content, facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    #[test]
    fn substitutes_every_occurrence() {
        let facts = indexmap! { "name".to_string() => "Vale".to_string() };
        assert_eq!(render("Hello {{name}}, ref {{name}}", &facts), "Hello Vale, ref Vale");
    }

    #[test]
    fn missing_facts_render_uppercased_markers() {
        let facts = FactMap::new();
        assert_eq!(
            render("Hello {{name}}, ref {{name}}", &facts),
            "Hello [MISSING NAME], ref [MISSING NAME]"
        );

        let empty = indexmap! { "state_file_no".to_string() => String::new() };
        assert_eq!(render("No. {{state_file_no}}", &empty), "No. [MISSING STATE_FILE_NO]");
    }

    #[test]
    fn rendering_is_idempotent_and_order_independent() {
        let content = "{{b}} then {{a}} then {{b}}";
        let forward = indexmap! { "a".to_string() => "1".to_string(), "b".to_string() => "2".to_string() };
        let reverse = indexmap! { "b".to_string() => "2".to_string(), "a".to_string() => "1".to_string() };
        let first = render(content, &forward);
        assert_eq!(first, render(content, &forward));
        assert_eq!(first, render(content, &reverse));
        assert_eq!(first, "2 then 1 then 2");
    }

    #[test]
    fn keys_are_case_sensitive_and_extra_facts_ignored() {
        let facts = indexmap! {
            "Name".to_string() => "Upper".to_string(),
            "unused".to_string() => "ignored".to_string(),
        };
        assert_eq!(render("{{name}}/{{Name}}", &facts), "[MISSING NAME]/Upper");
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let facts = indexmap! { "a".to_string() => "{{b}}".to_string(), "b".to_string() => "x".to_string() };
        let rendered = render("{{a}}", &facts);
        assert_eq!(rendered, "{{b}}");
        assert_eq!(render("{{a}}", &facts), rendered);
    }

    #[test]
    fn unterminated_and_empty_tokens_stay_literal() {
        let facts = FactMap::new();
        assert_eq!(render("open {{name and more", &facts), "open {{name and more");
        assert_eq!(render("empty {{}} token", &facts), "empty {{}} token");
        assert_eq!(render("no placeholders", &facts), "no placeholders");
    }

    #[test]
    fn nested_opener_binds_innermost_key() {
        let facts = indexmap! { "b".to_string() => "B".to_string() };
        assert_eq!(render("{{a {{b}} end", &facts), "{{a B end");
    }

    #[test]
    fn extra_opening_braces_stay_literal() {
        let facts = indexmap! { "name".to_string() => "Vale".to_string() };
        assert_eq!(render("{{{name}}}", &facts), "{Vale}");
        assert_eq!(render("{{{name}}", &facts), "{Vale");
        assert_eq!(render("{\"n\":{{{name}}}}", &facts), "{\"n\":{Vale}}");
        assert_eq!(render("{{{{name}}", &facts), "{{Vale");
        assert_eq!(placeholder_keys("{{{name}}}"), vec!["name".to_string()]);
    }

    #[test]
    fn placeholder_keys_are_distinct_in_first_occurrence_order() {
        assert_eq!(
            placeholder_keys("{{z}} {{a}} {{z}} {{m}}"),
            vec!["z".to_string(), "a".to_string(), "m".to_string()]
        );
        assert!(placeholder_keys("plain").is_empty());
    }
}
