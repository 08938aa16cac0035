//! Terminal UI components (spinner, colors).

mod spinner;
mod theme;

pub use spinner::Spinner;
pub use theme::Style;

/// Formats an optional setting the way `configure --show` prints it.
pub fn or_not_set(value: Option<&str>) -> String {
    value.map_or_else(|| Style::secondary("(not set)"), Style::value)
}
