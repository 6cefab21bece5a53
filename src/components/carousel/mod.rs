//! Paging skills carousel: manual arrows, hover-paused auto-advance, and
//! debounced resize re-layout. The index/geometry rules live in [`pager`];
//! this module owns the DOM anchors, listeners, and timers.

pub mod pager;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::callback::{Interval, Timeout};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlButtonElement, HtmlElement};

use crate::components::{progress_ring, MountError};
use crate::services::dom;
use crate::services::logging::Logger;

use pager::{Move, Pager, TrackGeometry};

const TRACK_SELECTOR: &str = ".skills-track";
const VIEWPORT_SELECTOR: &str = ".skills-carousel";
const WRAPPER_SELECTOR: &str = ".skills-carousel-wrapper";
const LEFT_ARROW_SELECTOR: &str = ".left-arrow";
const RIGHT_ARROW_SELECTOR: &str = ".right-arrow";
const COMPONENT: &str = "skills-carousel";

/// Tunables for the carousel. All timing lives here rather than inline.
#[derive(Clone, PartialEq)]
pub struct CarouselConfig {
    /// How many cards the viewport shows at once.
    pub visible_items: usize,
    /// Auto-advance period, in milliseconds.
    pub auto_scroll_interval_ms: u32,
    /// Quiet window before a resize burst triggers re-measurement.
    pub resize_debounce_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            visible_items: 3,
            auto_scroll_interval_ms: 4000,
            resize_debounce_ms: 250,
        }
    }
}

struct CarouselInner {
    track: HtmlElement,
    cards: Vec<HtmlElement>,
    left_arrow: HtmlButtonElement,
    right_arrow: HtmlButtonElement,
    pager: Pager,
    config: CarouselConfig,
    /// At most one recurring timer is ever alive; replacing or taking the
    /// handle cancels it.
    auto_scroll: Option<Interval>,
    /// Pending debounced resize work; replaced (and thereby cancelled) by
    /// every fresh resize event.
    resize_debounce: Option<Timeout>,
}

/// Handle to a mounted carousel. The listeners keep the shared state alive,
/// so the handle may be dropped freely; it exists for callers that want to
/// drive or inspect navigation directly.
pub struct Carousel {
    state: Rc<RefCell<CarouselInner>>,
}

impl Carousel {
    /// Attaches the carousel to the page.
    ///
    /// Fail-soft: a missing anchor or an empty track hides the arrow
    /// controls, logs a diagnostic, and returns an error without touching
    /// anything else on the page.
    pub fn mount(document: &Document, config: CarouselConfig) -> Result<Self, MountError> {
        let track = dom::query(document, TRACK_SELECTOR)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let viewport = dom::query(document, VIEWPORT_SELECTOR)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let wrapper = dom::query(document, WRAPPER_SELECTOR)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok());
        let left_arrow = dom::query(document, LEFT_ARROW_SELECTOR)
            .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok());
        let right_arrow = dom::query(document, RIGHT_ARROW_SELECTOR)
            .and_then(|e| e.dyn_into::<HtmlButtonElement>().ok());

        let missing = [
            (TRACK_SELECTOR, track.is_none()),
            (VIEWPORT_SELECTOR, viewport.is_none()),
            (WRAPPER_SELECTOR, wrapper.is_none()),
            (LEFT_ARROW_SELECTOR, left_arrow.is_none()),
            (RIGHT_ARROW_SELECTOR, right_arrow.is_none()),
        ]
        .into_iter()
        .find_map(|(selector, absent)| absent.then_some(selector));

        if let Some(selector) = missing {
            Logger::error_with_component(
                COMPONENT,
                &format!(
                    "Essential element `{}` not found; check the markup against the expected selectors",
                    selector
                ),
            );
            hide_arrow(left_arrow.as_ref());
            hide_arrow(right_arrow.as_ref());
            return Err(MountError::MissingAnchor(selector));
        }

        let track = track.unwrap();
        let left_arrow = left_arrow.unwrap();
        let right_arrow = right_arrow.unwrap();
        let wrapper = wrapper.unwrap();
        let viewport = viewport.unwrap();

        let cards = dom::child_elements(&track);
        if cards.is_empty() {
            Logger::warn_with_component(
                COMPONENT,
                "No cards found inside the track; carousel will not function",
            );
            hide_arrow(Some(&left_arrow));
            hide_arrow(Some(&right_arrow));
            return Err(MountError::EmptyCollection {
                parent: TRACK_SELECTOR,
                expected: "cards",
            });
        }

        let geometry = measure_geometry(&cards[0], &track);
        if geometry.card_width == 0.0 {
            // Layout may not have settled yet; install everything anyway and
            // let the next resize pick up real measurements.
            Logger::error_with_component(
                COMPONENT,
                "Card width measured as 0; cards may be hidden or CSS still loading",
            );
        }

        let pager = Pager::new(cards.len(), config.visible_items, geometry);
        Logger::debug_with_component(
            COMPONENT,
            &format!(
                "card width {}px, gap {}px, viewport {}px, {} cards, {} visible, max index {}",
                geometry.card_width,
                geometry.gap,
                viewport.offset_width(),
                cards.len(),
                config.visible_items,
                pager.max_scroll_index()
            ),
        );

        let state = Rc::new(RefCell::new(CarouselInner {
            track,
            cards,
            left_arrow,
            right_arrow,
            pager,
            config,
            auto_scroll: None,
            resize_debounce: None,
        }));

        attach_arrow(&state, -1);
        attach_arrow(&state, 1);
        attach_hover(&state, &wrapper);
        attach_resize(&state);

        // Init order matters: gauges may live inside the cards and must be
        // correct before the first paint; arrows and auto-scroll depend on
        // the index state established by the initial snap.
        progress_ring::apply_all(document);
        update_arrows(&state.borrow());
        {
            let mut inner = state.borrow_mut();
            navigate(&mut inner, 0);
        }
        start_auto_scroll(&state);

        Ok(Self { state })
    }

    /// Clamped navigation to `target`, refreshing arrow enablement.
    pub fn scroll_to(&self, target: isize) {
        let mut inner = self.state.borrow_mut();
        navigate(&mut inner, target);
    }

    pub fn current_index(&self) -> usize {
        self.state.borrow().pager.current_index()
    }

    pub fn start_auto_scroll(&self) {
        start_auto_scroll(&self.state);
    }

    pub fn stop_auto_scroll(&self) {
        stop_auto_scroll(&self.state);
    }

    pub fn auto_scroll_running(&self) -> bool {
        self.state.borrow().auto_scroll.is_some()
    }
}

/// The one path every navigation source goes through: clamp, translate the
/// track, refresh arrow enablement.
fn navigate(inner: &mut CarouselInner, target: isize) {
    let mv = inner.pager.scroll_to(target);
    apply_move(inner, mv);
    update_arrows(inner);
}

fn apply_move(inner: &CarouselInner, mv: Move) {
    if let Move::Apply { offset_px } = mv {
        dom::set_style(&inner.track, "transform", &format!("translateX({}px)", offset_px));
    }
}

fn update_arrows(inner: &CarouselInner) {
    set_arrow_state(&inner.left_arrow, inner.pager.at_start());
    set_arrow_state(&inner.right_arrow, inner.pager.at_end());
}

fn set_arrow_state(arrow: &HtmlButtonElement, disabled: bool) {
    arrow.set_disabled(disabled);
    dom::set_style(arrow, "opacity", if disabled { "0.5" } else { "1" });
    dom::set_style(arrow, "cursor", if disabled { "not-allowed" } else { "pointer" });
}

fn hide_arrow(arrow: Option<&HtmlButtonElement>) {
    if let Some(arrow) = arrow {
        dom::set_style(arrow, "display", "none");
    }
}

fn measure_geometry(first_card: &HtmlElement, track: &HtmlElement) -> TrackGeometry {
    let card_width = first_card.offset_width() as f64;
    let gap = web_sys::window()
        .and_then(|w| w.get_computed_style(track).ok().flatten())
        .and_then(|style| style.get_property_value("gap").ok())
        .map(|value| dom::leading_number(&value))
        .unwrap_or(0.0);
    TrackGeometry { card_width, gap }
}

/// Starts the auto-advance timer, first stopping any prior instance so the
/// restart is idempotent. Refuses to start when everything already fits in
/// the viewport.
fn start_auto_scroll(state: &Rc<RefCell<CarouselInner>>) {
    stop_auto_scroll(state);

    let (can_scroll, interval_ms) = {
        let inner = state.borrow();
        (inner.pager.can_scroll(), inner.config.auto_scroll_interval_ms)
    };
    if !can_scroll {
        Logger::debug_with_component(COMPONENT, "Auto-scroll not started: nothing to page through");
        return;
    }

    let tick_state = Rc::clone(state);
    let interval = Interval::new(interval_ms, move || {
        let mut inner = tick_state.borrow_mut();
        let target = inner.pager.auto_advance_target();
        navigate(&mut inner, target);
    });
    state.borrow_mut().auto_scroll = Some(interval);
    Logger::debug_with_component(COMPONENT, "Auto-scroll started");
}

fn stop_auto_scroll(state: &Rc<RefCell<CarouselInner>>) {
    if state.borrow_mut().auto_scroll.take().is_some() {
        Logger::debug_with_component(COMPONENT, "Auto-scroll stopped");
    }
}

fn attach_arrow(state: &Rc<RefCell<CarouselInner>>, step: isize) {
    let arrow = {
        let inner = state.borrow();
        if step < 0 {
            inner.left_arrow.clone()
        } else {
            inner.right_arrow.clone()
        }
    };

    let click_state = Rc::clone(state);
    let on_click = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let mut inner = click_state.borrow_mut();
        let in_bounds = if step > 0 {
            !inner.pager.at_end()
        } else {
            !inner.pager.at_start()
        };
        if !in_bounds {
            return;
        }
        let target = inner.pager.current_index() as isize + step;
        navigate(&mut inner, target);
        // Interaction wins over automation; auto-scroll only returns on a
        // later hover-leave.
        if inner.auto_scroll.take().is_some() {
            Logger::debug_with_component(COMPONENT, "Auto-scroll stopped by manual navigation");
        }
    }) as Box<dyn FnMut(_)>);
    let _ = arrow.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}

fn attach_hover(state: &Rc<RefCell<CarouselInner>>, wrapper: &HtmlElement) {
    let enter_state = Rc::clone(state);
    let on_enter = Closure::wrap(Box::new(move |_: web_sys::Event| {
        if enter_state.borrow_mut().auto_scroll.take().is_some() {
            Logger::debug_with_component(COMPONENT, "Auto-scroll paused on hover");
        }
    }) as Box<dyn FnMut(_)>);
    let _ = wrapper.add_event_listener_with_callback("mouseenter", on_enter.as_ref().unchecked_ref());
    on_enter.forget();

    let leave_state = Rc::clone(state);
    let on_leave = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let running = leave_state.borrow().auto_scroll.is_some();
        if !running {
            start_auto_scroll(&leave_state);
        }
    }) as Box<dyn FnMut(_)>);
    let _ = wrapper.add_event_listener_with_callback("mouseleave", on_leave.as_ref().unchecked_ref());
    on_leave.forget();
}

fn attach_resize(state: &Rc<RefCell<CarouselInner>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let resize_state = Rc::clone(state);
    let on_resize = Closure::wrap(Box::new(move |_: web_sys::Event| {
        let debounce_ms = resize_state.borrow().config.resize_debounce_ms;
        let fire_state = Rc::clone(&resize_state);
        let timeout = Timeout::new(debounce_ms, move || {
            Logger::debug_with_component(COMPONENT, "Window resized, remeasuring track geometry");
            let mut inner = fire_state.borrow_mut();
            let geometry = measure_geometry(&inner.cards[0], &inner.track);
            inner.pager.set_geometry(geometry);
            // The index is unchanged but the pixel offset is not, so this
            // bypasses the same-index guard on purpose.
            let mv = inner.pager.reapply();
            apply_move(&inner, mv);
            update_arrows(&inner);
        });
        // Swapping in the new handle drops, and thereby cancels, whatever
        // was still pending.
        resize_state.borrow_mut().resize_debounce.replace(timeout);
    }) as Box<dyn FnMut(_)>);
    let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();
}
