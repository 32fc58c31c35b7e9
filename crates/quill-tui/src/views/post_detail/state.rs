//! Post-detail view state.

use quill_core::models::Post;
use quill_core::session::Session;

/// State for one mounted post-detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetailState {
    /// Route parameter this mount was opened with.
    pub post_id: String,
    pub phase: DetailPhase,
}

/// Observable phases of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPhase {
    /// Initial fetch outstanding; placeholder rendered.
    Loading,
    /// Data present.
    Loaded {
        post: Post,
        /// Whether the signed-in user is in the post's liked-set. Set at
        /// load time from the fetched snapshot and thereafter only from the
        /// server's response to a toggle call, never flipped blindly.
        liked: bool,
    },
}

impl PostDetailState {
    pub fn new(post_id: String) -> Self {
        Self {
            post_id,
            phase: DetailPhase::Loading,
        }
    }

    /// Enters the loaded phase, deriving the liked flag from the snapshot.
    pub fn on_loaded(&mut self, post: Post, session: &Session) {
        let liked = post.liked_by(session.user_id());
        self.phase = DetailPhase::Loaded { post, liked };
    }

    /// Reconciles post and liked flag from the server's authoritative
    /// response to a toggle call.
    pub fn reconcile_like(&mut self, updated: Post, session: &Session) {
        if let DetailPhase::Loaded { post, liked } = &mut self.phase {
            *liked = updated.liked_by(session.user_id());
            *post = updated;
        }
    }

    pub fn post(&self) -> Option<&Post> {
        match &self.phase {
            DetailPhase::Loaded { post, .. } => Some(post),
            DetailPhase::Loading => None,
        }
    }
}

/// Which action controls the viewer sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Controls {
    /// The viewer wrote this post: edit and delete, no like.
    Author,
    /// Anyone else: like only.
    Reader,
}

/// Resolves the viewer's controls for a post.
pub fn controls(post: &Post, session: &Session) -> Controls {
    if post.authored_by(session.user_id()) {
        Controls::Author
    } else {
        Controls::Reader
    }
}
