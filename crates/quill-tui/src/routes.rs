//! Client-side routes and the navigation guard.

use quill_core::session::Session;

/// A navigable location in the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The post feed. Reachable signed in or out.
    Home,
    /// Sign-in form. Only meaningful signed out.
    Login,
    /// Account creation form. Only meaningful signed out.
    Register,
    /// New-post form. Requires a session.
    Create,
    /// One post with its actions. Requires a session.
    PostDetail(String),
    /// Edit form for an existing post. Requires a session.
    UpdatePost(String),
    /// Terminal state after a failed detail fetch.
    Error,
}

impl Route {
    /// Whether this route requires an authenticated session.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Create | Route::PostDetail(_) | Route::UpdatePost(_)
        )
    }

    /// Whether this route only makes sense without a session.
    pub fn unauthenticated_only(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

/// Resolves a navigation request against the current session.
///
/// A binary decision per route: auth-required routes bounce signed-out users
/// to [`Route::Login`]; signed-in users asking for the login/register forms
/// land on [`Route::Home`]. No roles, no token-expiry check.
pub fn resolve(requested: Route, session: Option<&Session>) -> Route {
    match session {
        None if requested.requires_auth() => Route::Login,
        Some(_) if requested.unauthenticated_only() => Route::Home,
        _ => requested,
    }
}
