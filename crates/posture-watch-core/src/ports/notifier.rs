//! Notification port for audible alerts.

/// Port for a fire-and-forget user notification.
pub trait Notifier: Send + Sync {
    /// Emits a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be emitted. Callers ignore it.
    fn notify(&self) -> anyhow::Result<()>;
}
