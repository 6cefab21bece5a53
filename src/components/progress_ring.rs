//! Circular progress gauges drawn with the stroke dash technique: the dash
//! array establishes the full-circle baseline and the dash offset carves out
//! the filled fraction.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, SvgCircleElement};

use crate::services::dom;
use crate::services::logging::Logger;

const GAUGE_SELECTOR: &str = ".progress-bar";
const CONTAINER_SELECTOR: &str = ".progress-container";
const LABEL_SELECTOR: &str = ".progress-text";
const COMPONENT: &str = "progress-rings";

/// Declared percentage coerced into `[0, 100]`. The attribute is read
/// parseFloat-style, keeping a numeric prefix (`"85.5%"` -> 85.5); input
/// with no numeric prefix collapses to the lower bound. The flag reports
/// whether coercion changed the value, so callers can warn exactly once per
/// bad attribute.
pub fn clamp_percentage(raw: &str) -> (f64, bool) {
    let Some(parsed) = dom::parse_leading(raw).filter(|p| !p.is_nan()) else {
        return (0.0, true);
    };
    let clamped = parsed.clamp(0.0, 100.0);
    (clamped, clamped != parsed)
}

/// Dash measurements for one ring, derived from its radius and an already
/// clamped percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPlan {
    pub circumference: f64,
    pub offset: f64,
    /// Rounded integer percentage for the adjacent text label.
    pub label: u32,
}

impl DashPlan {
    pub fn for_ring(radius: f64, percentage: f64) -> Self {
        let circumference = 2.0 * std::f64::consts::PI * radius;
        Self {
            circumference,
            offset: circumference * (1.0 - percentage / 100.0),
            label: percentage.round() as u32,
        }
    }
}

/// Renders every gauge on the page. Per-ring problems (bad radius, missing
/// or invalid percentage, absent label) skip or clamp that ring with a
/// diagnostic; they never abort the pass.
pub fn apply_all(document: &Document) {
    let rings = match document.query_selector_all(GAUGE_SELECTOR) {
        Ok(list) => list,
        Err(_) => return,
    };
    if rings.length() == 0 {
        Logger::warn_with_component(COMPONENT, "No progress ring elements found");
        return;
    }

    let mut applied = 0;
    for i in 0..rings.length() {
        let Some(node) = rings.get(i) else { continue };
        match node.dyn_into::<SvgCircleElement>() {
            Ok(circle) => {
                if render_ring(&circle) {
                    applied += 1;
                }
            }
            Err(_) => {
                Logger::error_with_component(
                    COMPONENT,
                    "Progress ring element is not an SVG circle; skipping",
                );
            }
        }
    }
    Logger::info_with_component(
        COMPONENT,
        &format!("Applied progress to {} of {} rings", applied, rings.length()),
    );
}

fn render_ring(circle: &SvgCircleElement) -> bool {
    let radius = match circle.r().base_val().value() {
        Ok(r) => f64::from(r),
        Err(_) => {
            Logger::error_with_component(COMPONENT, "SVG circle `r` attribute missing or invalid");
            return false;
        }
    };

    let Some(attr) = circle.get_attribute("data-percentage") else {
        Logger::warn_with_component(COMPONENT, "Ring missing `data-percentage` attribute; skipping");
        return false;
    };
    let (percentage, coerced) = clamp_percentage(&attr);
    if coerced {
        Logger::warn_with_component(
            COMPONENT,
            &format!("Invalid `data-percentage` value ({}); clamped to {}", attr, percentage),
        );
    }

    let plan = DashPlan::for_ring(radius, percentage);
    update_label(circle, plan.label);

    let style = circle.style();
    let _ = style.set_property(
        "stroke-dasharray",
        &format!("{} {}", plan.circumference, plan.circumference),
    );
    schedule_offset_write(&style, plan.offset);
    true
}

fn update_label(circle: &SvgCircleElement, label: u32) {
    match circle.closest(CONTAINER_SELECTOR) {
        Ok(Some(container)) => match dom::query_within(&container, LABEL_SELECTOR) {
            Some(text) => text.set_text_content(Some(&format!("{}%", label))),
            None => Logger::warn_with_component(
                COMPONENT,
                "No percentage label found within the ring container",
            ),
        },
        _ => Logger::warn_with_component(COMPONENT, "No container found for progress ring"),
    }
}

/// Writes the dash offset one paint frame after the dash array, so the
/// browser commits the full-circle baseline before the offset starts
/// transitioning; writing both in the same frame can suppress the animation.
fn schedule_offset_write(style: &CssStyleDeclaration, offset: f64) {
    let value = format!("{}", offset);
    let deferred_style = style.clone();
    let deferred_value = value.clone();
    let frame = Closure::once(move || {
        let _ = deferred_style.set_property("stroke-dashoffset", &deferred_value);
    });

    let scheduled = web_sys::window()
        .and_then(|w| {
            w.request_animation_frame(frame.as_ref().unchecked_ref::<js_sys::Function>())
                .ok()
        })
        .is_some();
    if scheduled {
        frame.forget();
    } else {
        // No frame scheduler available; apply directly and accept that the
        // transition may be skipped.
        let _ = style.set_property("stroke-dashoffset", &value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo::timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::HtmlElement;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn percentages_clamp_to_range() {
        assert_eq!(clamp_percentage("85.5"), (85.5, false));
        assert_eq!(clamp_percentage("150"), (100.0, true));
        assert_eq!(clamp_percentage("-5"), (0.0, true));
        assert_eq!(clamp_percentage("not-a-number"), (0.0, true));
        assert_eq!(clamp_percentage("NaN"), (0.0, true));
    }

    #[wasm_bindgen_test]
    fn percentages_keep_a_numeric_prefix() {
        // A stray unit or trailing space keeps the declared number, the way
        // parseFloat reads it.
        assert_eq!(clamp_percentage("85.5%"), (85.5, false));
        assert_eq!(clamp_percentage("42 "), (42.0, false));
        assert_eq!(clamp_percentage(" 7px"), (7.0, false));
    }

    #[wasm_bindgen_test]
    fn offset_stays_within_the_circumference() {
        for raw in ["0", "1", "37.5", "99", "100", "250", "-40", "junk"] {
            let (pct, _) = clamp_percentage(raw);
            let plan = DashPlan::for_ring(54.0, pct);
            assert!(plan.offset >= 0.0, "offset negative for {}", raw);
            assert!(plan.offset <= plan.circumference, "offset too large for {}", raw);
        }
    }

    #[wasm_bindgen_test]
    fn full_ring_has_zero_offset() {
        let plan = DashPlan::for_ring(50.0, 100.0);
        assert_eq!(plan.offset, 0.0);
        assert_eq!(plan.label, 100);

        let empty = DashPlan::for_ring(50.0, 0.0);
        assert_eq!(empty.offset, empty.circumference);
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn build_fixture(circle_markup: &str) -> HtmlElement {
        let document = document();
        let root: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        root.set_inner_html(&format!(
            "<div class=\"progress-container\">\
               <svg>{}</svg>\
               <span class=\"progress-text\"></span>\
             </div>",
            circle_markup
        ));
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    #[wasm_bindgen_test]
    async fn out_of_range_ring_is_clamped_and_labelled() {
        let root =
            build_fixture("<circle class=\"progress-bar\" r=\"50\" data-percentage=\"150\"/>");
        apply_all(&document());

        let label = dom::query(&document(), LABEL_SELECTOR).unwrap();
        assert_eq!(label.text_content().unwrap(), "100%");

        let circle: SvgCircleElement = dom::query(&document(), GAUGE_SELECTOR)
            .unwrap()
            .dyn_into()
            .unwrap();
        let dasharray = circle.style().get_property_value("stroke-dasharray").unwrap();
        assert!(dasharray.starts_with("314.159"), "dasharray was {:?}", dasharray);

        // The offset lands one frame later.
        TimeoutFuture::new(100).await;
        let offset = circle.style().get_property_value("stroke-dashoffset").unwrap();
        assert!(offset.starts_with('0'), "offset was {:?}", offset);

        root.remove();
    }

    #[wasm_bindgen_test]
    fn ring_without_percentage_is_skipped() {
        let root = build_fixture("<circle class=\"progress-bar\" r=\"50\"/>");
        apply_all(&document());

        let circle: SvgCircleElement = dom::query(&document(), GAUGE_SELECTOR)
            .unwrap()
            .dyn_into()
            .unwrap();
        assert_eq!(circle.style().get_property_value("stroke-dasharray").unwrap(), "");
        assert_eq!(
            dom::query(&document(), LABEL_SELECTOR).unwrap().text_content().unwrap(),
            ""
        );

        root.remove();
    }
}
