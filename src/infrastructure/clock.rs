use std::time::Duration;
use chrono::{DateTime, Utc};
use crate::domain::KubercertError;
use crate::ports::Clock;

pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self { Self }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> { Utc::now() }

    async fn timeout<F, T>(&self, duration: Duration, future: F) -> Result<T, KubercertError>
    where
        F: std::future::Future<Output = T> + Send,
        T: Send,
    {
        tokio::time::timeout(duration, future).await
            .map_err(|_| KubercertError::timeout(format!("operation timed out after {:?}", duration)))
    }
}
