use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// First element matching `selector`, or `None` when absent or the selector
/// itself is rejected by the engine.
pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// Same as [`query`] but scoped to a subtree.
pub fn query_within(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// All elements matching `selector` under `root`, as typed HTML elements.
/// Non-HTML nodes in the result are skipped.
pub fn query_all_within(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let mut elements = Vec::new();
    if let Ok(list) = root.query_selector_all(selector) {
        for i in 0..list.length() {
            if let Some(node) = list.get(i) {
                if let Ok(element) = node.dyn_into::<HtmlElement>() {
                    elements.push(element);
                }
            }
        }
    }
    elements
}

/// Child elements of `parent`, in document order.
pub fn child_elements(parent: &Element) -> Vec<HtmlElement> {
    let children = parent.children();
    let mut elements = Vec::new();
    for i in 0..children.length() {
        if let Some(child) = children.item(i) {
            if let Ok(element) = child.dyn_into::<HtmlElement>() {
                elements.push(element);
            }
        }
    }
    elements
}

/// Writes an inline style property. Style writes only fail for malformed
/// property names, which are all compile-time constants here, so the result
/// is deliberately dropped.
pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

/// Leading numeric prefix of a value, parseFloat-style: `"16px"` -> `Some(16.0)`,
/// `"normal"` -> `None`.
pub fn parse_leading(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && *c == '-')))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// [`parse_leading`] with unparsable input collapsing to 0, for CSS lengths
/// where `"normal"` and friends mean "no length".
pub fn leading_number(value: &str) -> f64 {
    parse_leading(value).unwrap_or(0.0)
}
