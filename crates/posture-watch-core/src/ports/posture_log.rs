//! Persistence port for alert records.

/// Port for recording bad-posture alerts.
pub trait PostureLog: Send + Sync {
    /// Persists one alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written. Callers treat this as non-fatal.
    fn log_posture(&self, user_id: u32, label: &str, duration_secs: f32) -> anyhow::Result<()>;
}
