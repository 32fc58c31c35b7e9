//! Post-detail view: one post, its photo link, and the viewer's actions.
//!
//! The view is a three-state machine: it mounts *loading*, becomes *loaded*
//! when the fetch lands, and on fetch failure navigates to the error route
//! (the failed state lives outside this view). Like, delete, and edit are
//! only offered according to the viewer's relationship to the post.

mod render;
mod state;
mod update;

pub use render::render;
pub use state::{Controls, DetailPhase, PostDetailState, controls};
pub use update::{DetailCommand, handle_key};
