use crate::models::{NewProperty, Property};
use anyhow::Result;
use async_trait::async_trait;

/// Remote listing service. Implemented over HTTP in production and by
/// scripted fakes in tests.
#[async_trait]
pub trait PropertyApi: Send + Sync {
    /// Fetch the full, ordered property list
    async fn list_properties(&self) -> Result<Vec<Property>>;

    /// Create a property; the response body is not used
    async fn create_property(&self, property: &NewProperty) -> Result<()>;

    /// Where requests are sent, for log lines
    fn endpoint(&self) -> &str;
}
