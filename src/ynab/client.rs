use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::dto::{
    BudgetData, BudgetDetail, BudgetSummary, BudgetsData, CategoriesData, CategoryGroup, Envelope,
};
use crate::config::Config;
use crate::errors::{WrappedError, WrappedResult};

/// Authenticated session against the budgeting service, scoped to one run.
pub struct BudgetClient {
    http: Client,
    base_url: String,
}

impl BudgetClient {
    pub fn new(config: &Config) -> WrappedResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token()?))
            .map_err(|_| WrappedError::ParseFailed("API token contains invalid characters".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> WrappedResult<T> {
        debug!("GET {}", path);
        let resp = self.http.get(format!("{}{}", self.base_url, path)).send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(WrappedError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Envelope<T> = resp.json()?;
        Ok(envelope.data)
    }

    pub fn budgets(&self) -> WrappedResult<Vec<BudgetSummary>> {
        self.get::<BudgetsData>("/budgets").map(|data| data.budgets)
    }

    pub fn budget(&self, budget_id: &str) -> WrappedResult<BudgetDetail> {
        self.get::<BudgetData>(&format!("/budgets/{}", budget_id))
            .map(BudgetDetail::from)
    }

    /// All category groups of a budget, including hidden and internal ones.
    pub fn category_groups(&self, budget_id: &str) -> WrappedResult<Vec<CategoryGroup>> {
        self.get::<CategoriesData>(&format!("/budgets/{}/categories", budget_id))
            .map(|data| data.category_groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::mpsc;
    use std::thread;

    /// Answers a single request with `status` and `body`, handing the raw
    /// request back over the returned channel.
    fn serve_once(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buffer = [0; 4096];
                let read = stream.read(&mut buffer).unwrap_or(0);
                let _ = tx.send(String::from_utf8_lossy(&buffer[..read]).to_string());

                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (format!("http://{}/v1/", addr), rx)
    }

    fn config(base_url: String) -> Config {
        Config {
            token: Some("test-token".to_string()),
            base_url,
            ..Config::default()
        }
    }

    #[test]
    fn test_new_requires_token() {
        let result = BudgetClient::new(&Config::default());
        assert!(matches!(result, Err(WrappedError::MissingToken)));
    }

    #[test]
    fn test_budgets_sends_bearer_token() {
        let (base_url, requests) = serve_once(
            "200 OK",
            r#"{"data": {"budgets": [{"id": "b1", "name": "Household"}]}}"#,
        );

        let client = BudgetClient::new(&config(base_url)).unwrap();
        let budgets = client.budgets().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0].name, "Household");

        let request = requests.recv().unwrap();
        assert!(request.starts_with("GET /v1/budgets "));
        assert!(request.to_lowercase().contains("authorization: bearer test-token"));
    }

    #[test]
    fn test_budget_detail() {
        let (base_url, requests) = serve_once(
            "200 OK",
            r#"{"data": {"budget": {"id": "b1", "name": "Household"}, "server_knowledge": 12}}"#,
        );

        let budget = BudgetClient::new(&config(base_url)).unwrap().budget("b1").unwrap();
        assert_eq!(budget.server_knowledge, 12);
        assert!(requests.recv().unwrap().starts_with("GET /v1/budgets/b1 "));
    }

    #[test]
    fn test_error_status() {
        let (base_url, _requests) = serve_once(
            "401 Unauthorized",
            r#"{"error": {"id": "401", "name": "unauthorized"}}"#,
        );

        let result = BudgetClient::new(&config(base_url)).unwrap().category_groups("b1");
        assert!(matches!(
            result.unwrap_err(),
            WrappedError::ApiStatus { status: 401, body } if body.contains("unauthorized")
        ));
    }
}
