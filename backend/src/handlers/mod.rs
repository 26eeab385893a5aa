pub mod api_handlers;
pub mod api_models;
pub mod auth_handlers;
pub mod auth_models;

use crate::error::{AppError, AppResult};

/// Run one operation and log its failure with the operation name and the
/// input that caused it.
pub(crate) fn logged<T>(operation: &'static str, input: &str, f: impl FnOnce() -> AppResult<T>) -> AppResult<T> {
    f().map_err(|err| {
        if err.status_code().is_server_error() {
            tracing::error!(operation, input, error = %err, "Request failed");
        } else {
            tracing::warn!(operation, input, error = %err, "Request rejected");
        }
        err
    })
}

/// Like [`logged`], but runs `f` on the blocking thread pool. Used for work
/// dominated by bcrypt.
pub(crate) async fn logged_blocking<T, F>(operation: &'static str, input: String, f: F) -> AppResult<T>
where
    F: FnOnce() -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f)
        .await
        .unwrap_or_else(|e| Err(AppError::Internal(format!("Background task failed: {e}"))));
    logged(operation, &input, || result)
}

/// Log and reject a request whose error was produced before any work ran.
pub(crate) fn reject<T>(operation: &'static str, input: &str, err: AppError) -> AppResult<T> {
    logged(operation, input, || Err(err))
}
