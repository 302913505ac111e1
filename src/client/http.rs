use crate::client::traits::PropertyApi;
use crate::config::Config;
use crate::models::{NewProperty, Property};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

/// JSON-over-HTTP listing service client
pub struct HttpPropertyClient {
    client: Client,
    endpoint: Url,
}

impl HttpPropertyClient {
    /// Build a client for the configured endpoint. No request timeout is set.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl PropertyApi for HttpPropertyClient {
    async fn list_properties(&self) -> Result<Vec<Property>> {
        debug!("GET {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .context("Failed to fetch properties")?;

        if !response.status().is_success() {
            warn!("Listing service returned status: {}", response.status());
            anyhow::bail!("Failed to fetch properties: {}", response.status());
        }

        let properties: Vec<Property> = response
            .json()
            .await
            .context("Failed to decode property list")?;

        debug!("Received {} properties", properties.len());
        Ok(properties)
    }

    async fn create_property(&self, property: &NewProperty) -> Result<()> {
        debug!("POST {} ({})", self.endpoint, property.name);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(property)
            .send()
            .await
            .context("Failed to send new property")?;

        if !response.status().is_success() {
            warn!("Listing service rejected new property: {}", response.status());
            anyhow::bail!("Failed to create property: {}", response.status());
        }

        Ok(())
    }

    fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Answer one request with a canned response; the handle yields the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (Config, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        let config = Config {
            api_url: Url::parse(&format!("http://{addr}/properties")).unwrap(),
            log_filter: "info".to_string(),
            user_agent: "property-listings-test".to_string(),
        };
        (config, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn body_of(request: &str) -> serde_json::Value {
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        serde_json::from_str(body).unwrap()
    }

    fn new_property() -> NewProperty {
        NewProperty {
            name: "Lake House".to_string(),
            kind: "Villa".to_string(),
            price: 4_500_000.0,
            location: "Goa".to_string(),
            description: "By the water".to_string(),
            image: String::new(),
            lat: None,
            lng: Some(12.9),
        }
    }

    #[tokio::test]
    async fn test_list_decodes_body() {
        let (config, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"name":"A","type":"Villa","price":10,"location":"Goa"},{"id":"b","name":"B","type":"Plot","location":"Pune"}]"#,
        )
        .await;
        let client = HttpPropertyClient::new(&config).unwrap();

        let properties = client.list_properties().await.unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties[1].name, "B");

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /properties HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_list_server_error_fails() {
        let (config, server) = serve_once("500 Internal Server Error", "{}").await;
        let client = HttpPropertyClient::new(&config).unwrap();

        assert!(client.list_properties().await.is_err());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_create_posts_json_without_absent_coordinates() {
        let (config, server) = serve_once("201 Created", r#"{"id":3}"#).await;
        let client = HttpPropertyClient::new(&config).unwrap();

        client.create_property(&new_property()).await.unwrap();

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /properties HTTP/1.1"));
        assert!(request.to_ascii_lowercase().contains("content-type: application/json"));

        let body = body_of(&request);
        assert!(body.get("lat").is_none());
        assert_eq!(body["lng"], serde_json::json!(12.9));
        assert_eq!(body["type"], serde_json::json!("Villa"));
        assert_eq!(body["image"], serde_json::json!(""));
    }

    #[tokio::test]
    async fn test_create_rejected_status_fails() {
        let (config, server) = serve_once("400 Bad Request", r#"{"error":"bad"}"#).await;
        let client = HttpPropertyClient::new(&config).unwrap();

        assert!(client.create_property(&new_property()).await.is_err());
        server.await.unwrap();
    }
}
