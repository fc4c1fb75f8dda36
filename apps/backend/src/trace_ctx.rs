//! Task-local trace id.
//!
//! The RequestTrace middleware opens a scope per request; anything running
//! inside it (handlers, error rendering, repo logging) can read the id
//! without threading it through call signatures.

use std::future::Future;

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

const NO_TRACE: &str = "unknown";

/// The current request's trace id, or "unknown" outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| NO_TRACE.to_string())
}

/// Run `fut` with `id` installed as the task-local trace id.
pub async fn scope<F: Future>(id: String, fut: F) -> F::Output {
    TRACE_ID.scope(id, fut).await
}

#[cfg(test)]
mod tests {
    use super::{scope, trace_id};

    #[tokio::test]
    async fn unset_outside_a_scope() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn visible_inside_a_scope_only() {
        scope("abc-123".to_string(), async {
            assert_eq!(trace_id(), "abc-123");
        })
        .await;
        assert_eq!(trace_id(), "unknown");
    }
}
