//! Filter-tab strip with an animated selection indicator.
//!
//! The indicator is a separate element whose width/transform track the
//! measured geometry of the active button. Transition is suppressed for the
//! initial placement and for resize re-snaps so the indicator never animates
//! from a stale position; clicks animate normally.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use crate::components::MountError;
use crate::services::dom;
use crate::services::logging::Logger;

const CONTAINER_SELECTOR: &str = ".filter-tabs";
const BUTTON_SELECTOR: &str = ".tab-button";
const INDICATOR_SELECTOR: &str = ".slider";
const ACTIVE_CLASS: &str = "active";
const COMPONENT: &str = "filter-tabs";

#[derive(Clone, PartialEq)]
pub struct TabIndicatorConfig {
    /// Transition applied while the indicator animates between buttons.
    pub transition: String,
    /// How long transition suppression lasts after a snap, in milliseconds.
    pub transition_settle_ms: u32,
    /// Quiet window before a resize burst triggers a re-snap.
    pub resize_debounce_ms: u32,
}

impl Default for TabIndicatorConfig {
    fn default() -> Self {
        Self {
            transition: "transform 0.35s cubic-bezier(0.65, 0, 0.35, 1), \
                         width 0.35s cubic-bezier(0.65, 0, 0.35, 1)"
                .to_string(),
            transition_settle_ms: 50,
            resize_debounce_ms: 100,
        }
    }
}

struct TabsInner {
    container: HtmlElement,
    buttons: Vec<HtmlElement>,
    indicator: HtmlElement,
    config: TabIndicatorConfig,
    resize_debounce: Option<Timeout>,
}

pub struct TabIndicator {
    state: Rc<RefCell<TabsInner>>,
}

impl TabIndicator {
    /// Attaches the indicator behavior. Fail-soft: missing markup logs a
    /// diagnostic and leaves the page untouched.
    pub fn mount(document: &Document, config: TabIndicatorConfig) -> Result<Self, MountError> {
        let Some(container) = dom::query(document, CONTAINER_SELECTOR)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            Logger::warn_with_component(COMPONENT, "Tabs container not found");
            return Err(MountError::MissingAnchor(CONTAINER_SELECTOR));
        };

        let buttons = dom::query_all_within(&container, BUTTON_SELECTOR);
        if buttons.is_empty() {
            Logger::warn_with_component(COMPONENT, "No tab buttons found");
            return Err(MountError::EmptyCollection {
                parent: CONTAINER_SELECTOR,
                expected: "tab buttons",
            });
        }

        let Some(indicator) = dom::query_within(&container, INDICATOR_SELECTOR)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        else {
            Logger::warn_with_component(COMPONENT, "Indicator element not found");
            return Err(MountError::MissingAnchor(INDICATOR_SELECTOR));
        };

        let state = Rc::new(RefCell::new(TabsInner {
            container,
            buttons,
            indicator,
            config,
            resize_debounce: None,
        }));

        attach_clicks(&state);
        attach_resize(&state);
        initial_placement(&state);

        Ok(Self { state })
    }

    /// The button currently holding the active marker, if any.
    pub fn active_button(&self) -> Option<HtmlElement> {
        find_active(&self.state.borrow().buttons)
    }
}

/// Moves the active marker atomically: clears it from every button, then
/// sets it on `target`, so exactly one button holds it afterwards.
fn set_active(buttons: &[HtmlElement], target: &HtmlElement) {
    for button in buttons {
        let _ = button.class_list().remove_1(ACTIVE_CLASS);
    }
    let _ = target.class_list().add_1(ACTIVE_CLASS);
}

fn find_active(buttons: &[HtmlElement]) -> Option<HtmlElement> {
    buttons
        .iter()
        .find(|b| b.class_list().contains(ACTIVE_CLASS))
        .cloned()
}

/// Sizes and positions the indicator over `button`, relative to the
/// container.
fn snap_to(inner: &TabsInner, button: &HtmlElement) {
    let target = button.get_bounding_client_rect();
    let origin = inner.container.get_bounding_client_rect();
    let left = target.left() - origin.left();
    dom::set_style(&inner.indicator, "width", &format!("{}px", target.width()));
    dom::set_style(&inner.indicator, "transform", &format!("translateX({}px)", left));
}

/// Snap with transition suppressed for exactly this update, restoring the
/// configured transition after a short settle delay.
fn snap_without_transition(state: &Rc<RefCell<TabsInner>>, button: &HtmlElement) {
    let inner = state.borrow();
    dom::set_style(&inner.indicator, "transition", "none");
    snap_to(&inner, button);

    let indicator = inner.indicator.clone();
    let transition = inner.config.transition.clone();
    Timeout::new(inner.config.transition_settle_ms, move || {
        dom::set_style(&indicator, "transition", &transition);
    })
    .forget();
}

fn initial_placement(state: &Rc<RefCell<TabsInner>>) {
    let active = find_active(&state.borrow().buttons);
    let Some(active) = active else {
        // Without a pre-marked button the indicator stays parked at its
        // default geometry until the first click.
        Logger::warn_with_component(COMPONENT, "No default active button found");
        return;
    };

    // Defer one frame so layout has settled before the first measurement.
    let frame_state = Rc::clone(state);
    let frame = Closure::once(move || snap_without_transition(&frame_state, &active));
    let scheduled = web_sys::window()
        .and_then(|w| {
            w.request_animation_frame(frame.as_ref().unchecked_ref::<js_sys::Function>())
                .ok()
        })
        .is_some();
    if scheduled {
        frame.forget();
    }
}

fn attach_clicks(state: &Rc<RefCell<TabsInner>>) {
    let buttons = state.borrow().buttons.clone();
    for button in buttons {
        let click_state = Rc::clone(state);
        let clicked = button.clone();
        let on_click = Closure::wrap(Box::new(move |_: web_sys::Event| {
            if clicked.class_list().contains(ACTIVE_CLASS) {
                return;
            }
            let inner = click_state.borrow();
            set_active(&inner.buttons, &clicked);
            snap_to(&inner, &clicked);
            Logger::debug_with_component(
                COMPONENT,
                &format!("Filter selected: {}", clicked.text_content().unwrap_or_default()),
            );
        }) as Box<dyn FnMut(_)>);
        let _ = button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
    }
}

fn attach_resize(state: &Rc<RefCell<TabsInner>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let resize_state = Rc::clone(state);
    let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let debounce_ms = resize_state.borrow().config.resize_debounce_ms;
        let fire_state = Rc::clone(&resize_state);
        let timeout = Timeout::new(debounce_ms, move || {
            let active = find_active(&fire_state.borrow().buttons);
            if let Some(active) = active {
                // Re-snap to the button's new geometry without animating the
                // jump.
                snap_without_transition(&fire_state, &active);
            }
        });
        // Swapping in the new handle drops, and thereby cancels, whatever
        // was still pending.
        resize_state.borrow_mut().resize_debounce.replace(timeout);
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn build_fixture(active_index: Option<usize>) -> HtmlElement {
        let document = document();
        let root: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        let buttons: String = (0..3)
            .map(|i| {
                let class = if active_index == Some(i) {
                    "tab-button active"
                } else {
                    "tab-button"
                };
                format!("<button class=\"{}\">Tab {}</button>", class, i)
            })
            .collect();
        root.set_inner_html(&format!(
            "<div class=\"filter-tabs\">{}<div class=\"slider\"></div></div>",
            buttons
        ));
        document.body().unwrap().append_child(&root).unwrap();
        root
    }

    fn count_active(root: &HtmlElement) -> usize {
        dom::query_all_within(root, ".tab-button.active").len()
    }

    #[wasm_bindgen_test]
    fn config_defaults() {
        let config = TabIndicatorConfig::default();
        assert_eq!(config.transition_settle_ms, 50);
        assert_eq!(config.resize_debounce_ms, 100);
        assert!(config.transition.starts_with("transform 0.35s"));
    }

    #[wasm_bindgen_test]
    fn mount_degrades_without_container() {
        let result = TabIndicator::mount(&document(), TabIndicatorConfig::default());
        assert_eq!(result.err(), Some(MountError::MissingAnchor(CONTAINER_SELECTOR)));
    }

    #[wasm_bindgen_test]
    fn mount_degrades_without_indicator() {
        let document = document();
        let root: HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
        root.set_inner_html(
            "<div class=\"filter-tabs\"><button class=\"tab-button\">One</button></div>",
        );
        document.body().unwrap().append_child(&root).unwrap();

        let result = TabIndicator::mount(&document, TabIndicatorConfig::default());
        assert_eq!(result.err(), Some(MountError::MissingAnchor(INDICATOR_SELECTOR)));

        root.remove();
    }

    #[wasm_bindgen_test]
    fn click_moves_the_single_active_marker() {
        let root = build_fixture(Some(0));
        let tabs = TabIndicator::mount(&document(), TabIndicatorConfig::default()).unwrap();
        assert_eq!(count_active(&root), 1);

        let buttons = dom::query_all_within(&root, ".tab-button");
        buttons[2].click();

        assert_eq!(count_active(&root), 1);
        assert!(buttons[2].class_list().contains(ACTIVE_CLASS));
        assert_eq!(
            tabs.active_button().unwrap().text_content().unwrap(),
            "Tab 2"
        );

        root.remove();
    }

    #[wasm_bindgen_test]
    fn clicking_the_active_button_changes_nothing() {
        let root = build_fixture(Some(1));
        let _tabs = TabIndicator::mount(&document(), TabIndicatorConfig::default()).unwrap();

        let buttons = dom::query_all_within(&root, ".tab-button");
        buttons[1].click();

        assert_eq!(count_active(&root), 1);
        assert!(buttons[1].class_list().contains(ACTIVE_CLASS));

        root.remove();
    }

    #[wasm_bindgen_test]
    fn no_default_active_waits_for_the_first_click() {
        let root = build_fixture(None);
        let tabs = TabIndicator::mount(&document(), TabIndicatorConfig::default()).unwrap();

        assert_eq!(count_active(&root), 0);
        assert!(tabs.active_button().is_none());

        let buttons = dom::query_all_within(&root, ".tab-button");
        buttons[0].click();
        assert_eq!(count_active(&root), 1);

        root.remove();
    }
}
