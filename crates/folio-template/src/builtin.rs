//! Templates shipped with the playground
//!
//! Fragments live under `templates/<name>/` and are embedded at compile time.

use crate::template::ExampleTemplate;

/// Names of the built-in templates
pub const NAMES: &[&str] = &["card", "calculator", "todo", "clock"];

/// Template loaded when a playground starts without an explicit choice
pub const DEFAULT: &str = "card";

macro_rules! builtin {
    ($name:literal, $title:literal) => {
        ExampleTemplate::new(
            $name,
            include_str!(concat!("../templates/", $name, "/index.html")),
            include_str!(concat!("../templates/", $name, "/style.css")),
            include_str!(concat!("../templates/", $name, "/script.js")),
        )
        .map(|t| t.with_title($title))
    };
}

/// Build every built-in template
#[must_use]
pub fn all() -> Vec<ExampleTemplate> {
    [
        builtin!("card", "Animated Card"),
        builtin!("calculator", "Calculator"),
        builtin!("todo", "Todo List"),
        builtin!("clock", "Digital Clock"),
    ]
    .into_iter()
    // names are literals checked by `builtin_names_are_valid`
    .filter_map(Result::ok)
    .collect()
}
