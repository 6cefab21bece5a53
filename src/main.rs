mod components;
mod services;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use components::carousel::{Carousel, CarouselConfig};
use components::tabs::{TabIndicator, TabIndicatorConfig};
use components::typing_slider::{TypingSlider, TypingSliderConfig};
use services::logging::Logger;

/// Composition root: wires every page behavior against a ready document.
///
/// Each component validates its own markup anchors and degrades on its own;
/// a failed mount here is logged and never blocks the remaining components.
fn boot(document: &Document) {
    Logger::info_with_component("boot", "Document ready, initializing page behaviors");

    if let Err(e) = TypingSlider::mount(document, TypingSliderConfig::default()) {
        Logger::warn_with_component("typing-slider", &format!("Disabled: {}", e));
    }

    // Carousel init renders the progress rings before its first paint, so the
    // rings are not mounted separately here.
    match Carousel::mount(document, CarouselConfig::default()) {
        Ok(_) => Logger::info_with_component("skills-carousel", "Initialized successfully"),
        Err(e) => Logger::error_with_component("skills-carousel", &format!("Disabled: {}", e)),
    }

    if let Err(e) = TabIndicator::mount(document, TabIndicatorConfig::default()) {
        Logger::warn_with_component("filter-tabs", &format!("Disabled: {}", e));
    }

    Logger::info_with_component("boot", "All page behaviors initialized");
}

fn main() {
    let window = web_sys::window().expect("should have window");
    let document = window.document().expect("should have document");

    // The wasm module normally loads after parsing, but guard anyway so boot
    // never runs against a half-built tree.
    if document.ready_state() == "loading" {
        let doc = document.clone();
        let on_ready = Closure::once(move || boot(&doc));
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
            .expect("should attach DOMContentLoaded listener");
        on_ready.forget();
    } else {
        boot(&document);
    }
}
