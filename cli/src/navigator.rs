//! Terminal stand-in for page redirects.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use quill::{Navigator, Route};

/// Turns the client's redirects into one-line hints on stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalNavigator;

pub(crate) fn hint_for(route: &Route) -> String {
    match route {
        Route::Login => "session expired; run `quill login`".to_owned(),
        Route::Forbidden => "permission denied: only the author can change this post".to_owned(),
        Route::NotFound => "not found".to_owned(),
        other => format!("see {}", other.path()),
    }
}

impl Navigator for TerminalNavigator {
    fn redirect_to(&self, route: Route) {
        eprintln!("hint: {}", hint_for(&route));
    }
}
