use gloo::console;

/// Developer-facing console logger that tags every line with the component
/// it came from, so the four page behaviors can be told apart in the console.
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        console::debug!(Self::tagged(component, message));
    }

    pub fn info_with_component(component: &str, message: &str) {
        console::log!(Self::tagged(component, message));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        console::warn!(Self::tagged(component, message));
    }

    pub fn error_with_component(component: &str, message: &str) {
        console::error!(Self::tagged(component, message));
    }

    fn tagged(component: &str, message: &str) -> String {
        format!("[{}] {}", component, message)
    }
}
