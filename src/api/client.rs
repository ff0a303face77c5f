use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

/// REST client for the delivery platform. Attaches the bearer token of the
/// current session to every request and maps responses onto the error
/// taxonomy. The 401 rule is handled here, uniformly: the session is torn
/// down and navigation lands on the login route before the caller sees the
/// error.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    state: Arc<AppState>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, state: Arc<AppState>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            state,
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let response = self.send(self.http.get(self.url(path))).await?;
        decode(response).await
    }

    pub(crate) async fn get_json_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.send(self.http.get(self.url(path)).query(query)).await?;
        decode(response).await
    }

    pub(crate) async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        decode(response).await
    }

    pub(crate) async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(self.http.patch(self.url(path)).json(body)).await?;
        decode(response).await
    }

    pub(crate) async fn patch_empty(&self, path: &str) -> Result<(), AppError> {
        self.send(self.http.patch(self.url(path))).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let request = request.header("x-request-id", Uuid::new_v4().to_string());
        let request = match self.state.session() {
            Some(session) => request.bearer_auth(&session.token),
            None => request,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                self.count("transport");
                return Err(AppError::Transport(err.to_string()));
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.count("unauthorized");
            warn!("request rejected with 401; tearing down session");
            self.state.clear_session();
            return Err(AppError::Unauthorized);
        }
        if status.is_client_error() {
            self.count("rejected");
            return Err(AppError::Validation(error_message(response).await));
        }
        if status.is_server_error() {
            self.count("server_error");
            return Err(AppError::Server(status.as_u16()));
        }

        self.count("ok");
        Ok(response)
    }

    fn count(&self, outcome: &str) {
        self.state
            .metrics
            .api_requests_total
            .with_label_values(&[outcome])
            .inc();
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    response
        .json::<T>()
        .await
        .map_err(|err| AppError::Internal(format!("invalid response body: {err}")))
}

async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("request rejected ({status})")),
        Err(_) => format!("request rejected ({status})"),
    }
}
