use std::time::Duration;

/// Configuration shared by every provider REST client.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use marketfeed_sdk::RestClientConfig;
///
/// // Use default configuration
/// let config = RestClientConfig::default();
///
/// // Customize configuration
/// let config = RestClientConfig::default().with_timeout(Duration::from_secs(8));
/// ```
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    timeout: Duration,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl RestClientConfig {
    /// Returns the configured timeout for REST API requests.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sets the REST API request timeout. The default is 10 seconds.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
