pub mod download;
pub mod health;
pub mod index;
pub mod preview;

use retouch_core::AppError;

/// Run CPU-bound image work off the async reactor.
pub(crate) async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|e| {
        tracing::error!(error = %e, "Image processing task failed");
        AppError::from(anyhow::Error::new(e).context("Image processing task failed"))
    })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::ErrorMetadata;

    #[tokio::test]
    async fn test_run_blocking_returns_work_result() {
        let value = run_blocking(|| Ok::<_, AppError>(7)).await.unwrap();
        assert_eq!(value, 7);

        let err = run_blocking(|| Err::<(), _>(AppError::EmptyFilename))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyFilename));
    }

    #[tokio::test]
    async fn test_run_blocking_panic_keeps_join_error_as_source() {
        let err = run_blocking(|| -> Result<(), AppError> { panic!("worker died") })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InternalWithSource { .. }));
        assert_eq!(err.client_message(), "Internal server error");
        let details = err.detailed_message();
        assert!(details.contains("Image processing task failed"), "{}", details);
        assert!(details.contains("panicked"), "{}", details);
    }
}
