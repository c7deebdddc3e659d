//! Markup rendering.

use iris_core::MarkupError;

use crate::markup::{read, AttributeValue, Element, Markup};
use crate::options::FormatOptions;

/// Drop repeated classes, keeping the first occurrence of each.
pub fn dedupe_classes(class_name: &str) -> String {
    let mut seen = indexmap::IndexSet::new();
    for class in class_name.split_whitespace() {
        seen.insert(class);
    }
    seen.into_iter().collect::<Vec<_>>().join(" ")
}

/// Render markup nodes as text.
pub fn render(nodes: &[Markup], options: &FormatOptions) -> String {
    if options.pretty {
        let mut lines = Vec::new();
        for node in nodes {
            render_pretty(node, 0, options, &mut lines);
        }
        lines.join("\n")
    } else {
        let mut out = String::new();
        for node in nodes {
            render_minified(node, options, &mut out);
        }
        out
    }
}

/// Re-format existing markup text.
pub fn format(markup: &str, options: &FormatOptions) -> Result<String, MarkupError> {
    let nodes = read(markup)?;
    Ok(render(&nodes, options))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn open_tag(element: &Element, options: &FormatOptions) -> String {
    let mut tag = format!("<{}", element.name);
    for attribute in &element.attributes {
        tag.push(' ');
        tag.push_str(&attribute.name);
        match &attribute.value {
            None => {}
            Some(AttributeValue::Literal { value, quote }) => {
                let value = if attribute.name == "className" && options.remove_duplicates {
                    dedupe_classes(value)
                } else {
                    value.clone()
                };
                tag.push('=');
                tag.push(*quote);
                tag.push_str(&value);
                tag.push(*quote);
            }
            Some(AttributeValue::Expression(expression)) => {
                tag.push_str("={");
                tag.push_str(expression);
                tag.push('}');
            }
        }
    }
    tag.push_str(if element.self_closing { " />" } else { ">" });
    tag
}

fn close_tag(element: &Element) -> String {
    format!("</{}>", element.name)
}

fn render_pretty(node: &Markup, depth: usize, options: &FormatOptions, lines: &mut Vec<String>) {
    let indent = " ".repeat(depth * options.indent_size);
    match node {
        Markup::Text(text) => {
            let text = collapse_whitespace(text);
            if !text.is_empty() {
                lines.push(format!("{indent}{text}"));
            }
        }
        Markup::Element(element) if element.self_closing => {
            lines.push(format!("{indent}{}", open_tag(element, options)));
        }
        Markup::Element(element) if element.children.is_empty() => {
            lines.push(format!(
                "{indent}{}{}",
                open_tag(element, options),
                close_tag(element)
            ));
        }
        Markup::Element(element) => {
            lines.push(format!("{indent}{}", open_tag(element, options)));
            for child in &element.children {
                render_pretty(child, depth + 1, options, lines);
            }
            lines.push(format!("{indent}{}", close_tag(element)));
        }
    }
}

fn render_minified(node: &Markup, options: &FormatOptions, out: &mut String) {
    match node {
        Markup::Text(text) => out.push_str(&collapse_whitespace(text)),
        Markup::Element(element) => {
            out.push_str(&open_tag(element, options));
            if !element.self_closing {
                for child in &element.children {
                    render_minified(child, options, out);
                }
                out.push_str(&close_tag(element));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pretty() -> FormatOptions {
        FormatOptions::default()
    }

    #[test]
    fn test_dedupe_classes() {
        assert_eq!(dedupe_classes("flex flex-col gap-4 gap-4 mb-6"), "flex flex-col gap-4 mb-6");
        assert_eq!(dedupe_classes("gap-4 flex gap-4 mb-6 flex"), "gap-4 flex mb-6");
        assert_eq!(dedupe_classes(""), "");
        assert_eq!(dedupe_classes("flex"), "flex");
        assert_eq!(dedupe_classes("  a\t b  a "), "a b");
    }

    #[test]
    fn test_format_indents_nested_elements() {
        let input = "<div className=\"flex\">\n<div className=\"flex-col\">\n<Skeleton />\n</div>\n</div>";
        let output = format(input, &pretty()).unwrap();
        assert_eq!(
            output,
            "<div className=\"flex\">\n  <div className=\"flex-col\">\n    <Skeleton />\n  </div>\n</div>"
        );
    }

    #[test]
    fn test_format_single_line_input() {
        let output = format("<div><div><Skeleton /></div></div>", &pretty().with_indent_size(4)).unwrap();
        assert_eq!(output, "<div>\n    <div>\n        <Skeleton />\n    </div>\n</div>");
    }

    #[test]
    fn test_format_keeps_empty_elements_inline() {
        let output = format("<div className=\"flex\"></div>", &pretty()).unwrap();
        assert_eq!(output, "<div className=\"flex\"></div>");
    }

    #[test]
    fn test_format_sibling_roots() {
        let output = format("<div className=\"flex\" />\n<Skeleton />", &pretty()).unwrap();
        assert_eq!(output, "<div className=\"flex\" />\n<Skeleton />");
    }

    #[test]
    fn test_format_text_on_its_own_line() {
        let output = format("<p>  hello\n   world </p>", &pretty()).unwrap();
        assert_eq!(output, "<p>\n  hello world\n</p>");
    }

    #[test]
    fn test_format_tag_like_attribute_text() {
        let output = format("<div title=\"</div>\"><Skeleton /></div>", &pretty()).unwrap();
        assert_eq!(output, "<div title=\"</div>\">\n  <Skeleton />\n</div>");
    }

    #[test]
    fn test_minify() {
        let output = format("<div className=\"flex\">\n  <Skeleton />\n</div>", &FormatOptions::minified()).unwrap();
        assert_eq!(output, "<div className=\"flex\"><Skeleton /></div>");

        let output = format("<div> </div> <div> </div>", &FormatOptions::minified()).unwrap();
        assert_eq!(output, "<div></div><div></div>");
    }

    #[test]
    fn test_remove_duplicates_option() {
        let input = "<div className=\"flex flex flex-col\"></div>";

        let output = format(input, &pretty()).unwrap();
        assert_eq!(output, "<div className=\"flex flex-col\"></div>");

        let output = format(input, &pretty().with_remove_duplicates(false)).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_expression_attributes_round_trip() {
        let input = "<List items={rows.map(r => ({ id: r }))} />";
        assert_eq!(format(input, &pretty()).unwrap(), input);
    }

    #[test]
    fn test_format_reports_bad_markup() {
        assert!(matches!(
            format("<div>", &pretty()),
            Err(MarkupError::UnclosedTag { .. })
        ));
    }

    #[test]
    fn test_format_shorthand_fragment() {
        let output = format("<><Skeleton /></>", &pretty()).unwrap();
        assert_eq!(output, "<>\n  <Skeleton />\n</>");

        let output = format("<>\n  <Skeleton />\n</>", &FormatOptions::minified()).unwrap();
        assert_eq!(output, "<><Skeleton /></>");
    }
}
