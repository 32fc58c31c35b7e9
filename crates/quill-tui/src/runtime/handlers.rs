//! Effect handler implementations.
//!
//! Each handler is a pure async function returning the completion `UiEvent`;
//! the runtime owns spawning. Cancellation is raced against the HTTP call:
//! a cancelled handler still returns an event, which the reducer drops via
//! the task-id guard.

use std::future::Future;

use quill_core::api::{ApiClient, ApiResult};
use quill_core::models::{Credentials, PostDraft};
use quill_core::session::Session;
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;
use crate::events::{AuthIntent, PostIntent, UiEvent};

async fn run<T>(
    cancel: Option<CancellationToken>,
    fut: impl Future<Output = ApiResult<T>>,
) -> Result<T, String> {
    match cancel {
        Some(token) => tokio::select! {
            () = token.cancelled() => Err("cancelled".to_string()),
            result = fut => result.map_err(|e| e.to_string()),
        },
        None => fut.await.map_err(|e| e.to_string()),
    }
}

pub async fn fetch_feed(
    client: ApiClient,
    task: TaskId,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let result = run(cancel, client.fetch_feed()).await;
    UiEvent::FeedLoaded { task, result }
}

pub async fn fetch_post(
    client: ApiClient,
    token: Option<String>,
    id: String,
    task: TaskId,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let Some(token) = token else {
        return UiEvent::PostLoaded {
            task,
            result: Err("not signed in".to_string()),
        };
    };
    let result = run(cancel, client.fetch_post(&token, &id)).await;
    UiEvent::PostLoaded { task, result }
}

pub async fn toggle_like(
    client: ApiClient,
    token: Option<String>,
    id: String,
    task: TaskId,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let Some(token) = token else {
        return UiEvent::LikeCompleted {
            task,
            result: Err("not signed in".to_string()),
        };
    };
    let result = run(cancel, client.toggle_like(&token, &id)).await;
    UiEvent::LikeCompleted { task, result }
}

pub async fn delete_post(
    client: ApiClient,
    token: Option<String>,
    id: String,
    task: TaskId,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let Some(token) = token else {
        return UiEvent::DeleteCompleted {
            task,
            result: Err("not signed in".to_string()),
        };
    };
    let result = run(cancel, client.delete_post(&token, &id)).await;
    UiEvent::DeleteCompleted { task, result }
}

pub async fn submit_auth(
    client: ApiClient,
    intent: AuthIntent,
    credentials: Credentials,
    task: TaskId,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let call = async {
        match intent {
            AuthIntent::Login => client.login(&credentials).await,
            AuthIntent::Register => client.register(&credentials).await,
        }
    };
    let result = run(cancel, call).await.map(Session::from);
    UiEvent::AuthCompleted {
        task,
        intent,
        result,
    }
}

pub async fn submit_post(
    client: ApiClient,
    token: Option<String>,
    intent: PostIntent,
    draft: PostDraft,
    task: TaskId,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let Some(token) = token else {
        return UiEvent::PostSaved {
            task,
            result: Err("not signed in".to_string()),
        };
    };
    let call = async {
        match &intent {
            PostIntent::Create => client.create_post(&token, &draft).await,
            PostIntent::Update { id } => client.update_post(&token, id, &draft).await,
        }
    };
    let result = run(cancel, call).await;
    UiEvent::PostSaved { task, result }
}
