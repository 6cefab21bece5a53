//! Auto-advancing "typing" headline loop.
//!
//! The CSS owns the character-reveal effect; this component feeds it the
//! `--type-steps` / `--type-duration` custom properties, keeps exactly one
//! title in the typing state, and paces the cycle. The loop is a single
//! spawned task that runs for the page's lifetime; there is no stop contract.

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlElement};

use crate::components::MountError;
use crate::services::dom;
use crate::services::logging::Logger;

const SLIDER_SELECTOR: &str = ".typing-slider";
const TITLE_SELECTOR: &str = "h1";
const COMPONENT: &str = "typing-slider";

#[derive(Clone, PartialEq)]
pub struct TypingSliderConfig {
    /// Milliseconds per revealed character.
    pub type_speed_ms: u32,
    /// Hold after a title has fully typed out.
    pub pause_ms: u32,
    /// Slack added past the computed type duration so the CSS animation has
    /// visually finished before the pause starts.
    pub settle_buffer_ms: u32,
}

impl Default for TypingSliderConfig {
    fn default() -> Self {
        Self {
            type_speed_ms: 100,
            pause_ms: 2000,
            settle_buffer_ms: 50,
        }
    }
}

/// Total reveal time for a title with `steps` characters.
pub fn type_duration_ms(steps: usize, type_speed_ms: u32) -> u32 {
    steps as u32 * type_speed_ms
}

pub struct TypingSlider;

impl TypingSlider {
    /// Locates the slider and its titles and starts the cycle.
    pub fn mount(document: &Document, config: TypingSliderConfig) -> Result<(), MountError> {
        let Some(slider) = dom::query(document, SLIDER_SELECTOR) else {
            Logger::warn_with_component(COMPONENT, "Slider element not found");
            return Err(MountError::MissingAnchor(SLIDER_SELECTOR));
        };

        let titles = dom::query_all_within(&slider, TITLE_SELECTOR);
        if titles.is_empty() {
            Logger::warn_with_component(COMPONENT, "No titles found inside the slider");
            return Err(MountError::EmptyCollection {
                parent: SLIDER_SELECTOR,
                expected: "titles",
            });
        }

        Logger::info_with_component(
            COMPONENT,
            &format!("Starting sequence over {} titles", titles.len()),
        );
        spawn_local(run_sequence(titles, config));
        Ok(())
    }
}

/// Type -> pause -> advance, forever. The two awaits are the Typing and
/// Pausing phases; within one cycle they always complete in order.
async fn run_sequence(titles: Vec<HtmlElement>, config: TypingSliderConfig) {
    let mut current = 0usize;
    loop {
        let title = &titles[current];
        let text = title.text_content().unwrap_or_default();
        let steps = text.chars().count();
        let type_duration = type_duration_ms(steps, config.type_speed_ms);

        // Reset every title so exactly one is ever in the typing state.
        for t in &titles {
            dom::set_style(t, "display", "none");
            let _ = t.class_list().remove_1("typing");
            let _ = t.style().remove_property("--type-steps");
            let _ = t.style().remove_property("--type-duration");
        }

        dom::set_style(title, "--type-steps", &steps.to_string());
        dom::set_style(title, "--type-duration", &format!("{}ms", type_duration));
        dom::set_style(title, "display", "inline-block");
        let _ = title.class_list().add_1("typing");

        TimeoutFuture::new(type_duration + config.settle_buffer_ms).await;
        TimeoutFuture::new(config.pause_ms).await;

        current = (current + 1) % titles.len();
    }
}
