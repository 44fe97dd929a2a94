use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    auth::{LoginRequest, LoginResponse},
    DeleteQuery, FetchOptions, Page, PostConfig, Profile, Record, RecordQuery, RecordStore,
    Result, ServiceURL, SessionEvent, SessionListener, SessionProvider, SkapiError, TableRef,
};

/// HTTP client for a single service.
#[derive(Debug, Clone)]
pub struct SkapiClient {
    client: Client,
    service_url: ServiceURL,
    token: Arc<RwLock<Option<String>>>,
    listener: SessionListener,
}

impl SkapiClient {
    /// Create a client for `service_id`, optionally resuming a saved session.
    pub fn new(api_url: &str, service_id: &str, session_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            service_url: ServiceURL::new(api_url, service_id),
            token: Arc::new(RwLock::new(session_token)),
            listener: SessionListener::default(),
        }
    }

    /// Token of the current session, if any. Persist it to resume the session later.
    pub fn session_token(&self) -> Option<String> {
        self.token.read().expect("token lock poisoned").clone()
    }

    fn set_session_token(&self, token: Option<String>) {
        *self.token.write().expect("token lock poisoned") = token;
    }

    fn endpoint(&self, path: &str) -> String {
        self.service_url.append_path(path).as_ref().to_string()
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response> {
        let response = self.authorized(request).send().await.map_err(|e| {
            SkapiError::Response(format!("Failed to call {}: {}", call_name, e))
        })?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(SkapiError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(SkapiError::NotFound(call_name.to_string()));
        }
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => format!("{} returned {}", call_name, status),
            };
            return Err(SkapiError::Response(message));
        }

        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T> {
        let response = self.send(request, call_name).await?;
        response.json::<T>().await.map_err(|e| {
            SkapiError::Parsing(format!("Failed to parse {} response: {}", call_name, e))
        })
    }

    async fn send_without_body(&self, request: RequestBuilder, call_name: &str) -> Result<()> {
        let response = self.send(request, call_name).await?;
        let _ = response.bytes().await;
        Ok(())
    }
}

#[async_trait]
impl SessionProvider for SkapiClient {
    async fn get_profile(&self) -> Result<Option<Profile>> {
        if self.session_token().is_none() {
            return Ok(None);
        }

        match self
            .send_json::<Profile>(
                self.client.get(self.endpoint("auth/profile")),
                "GET auth/profile",
            )
            .await
        {
            Ok(profile) => Ok(Some(profile)),
            Err(SkapiError::Unauthorized) => {
                tracing::info!("saved session is no longer valid");
                self.set_session_token(None);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<Profile> {
        let response: LoginResponse = self
            .send_json(
                self.client
                    .post(self.endpoint("auth/login"))
                    .json(&LoginRequest { email, password }),
                "POST auth/login",
            )
            .await?;

        self.set_session_token(Some(response.token));
        self.listener
            .notify(SessionEvent::LoggedIn(response.profile.clone()));
        Ok(response.profile)
    }

    async fn logout(&self) -> Result<()> {
        if self.session_token().is_some() {
            let result = self
                .send_without_body(
                    self.client.post(self.endpoint("auth/logout")),
                    "POST auth/logout",
                )
                .await;
            match result {
                Ok(()) => {}
                // The service already ended the session.
                Err(SkapiError::Unauthorized) => tracing::info!("session had already expired"),
                Err(e) => return Err(e),
            }
        }

        self.set_session_token(None);
        self.listener.notify(SessionEvent::LoggedOut);
        Ok(())
    }

    fn subscribe(&self) -> UnboundedReceiver<SessionEvent> {
        self.listener.subscribe()
    }
}

#[async_trait]
impl RecordStore for SkapiClient {
    async fn post_record(&self, data: Value, config: &PostConfig) -> Result<Record> {
        if self.session_token().is_none() {
            return Err(SkapiError::NotLoggedIn);
        }

        self.send_json(
            self.client
                .post(self.endpoint("records"))
                .json(&PostRecordRequest {
                    data: &data,
                    table: &config.table,
                    tags: &config.tags,
                }),
            "POST records",
        )
        .await
    }

    async fn get_records(
        &self,
        query: &RecordQuery,
        options: &FetchOptions,
    ) -> Result<Page<Record>> {
        tracing::debug!(?query, ?options, "querying records");

        self.send_json(
            self.client
                .post(self.endpoint("records/query"))
                .json(&QueryRequest { query, options }),
            "POST records/query",
        )
        .await
    }

    async fn delete_records(&self, query: &DeleteQuery) -> Result<()> {
        let result = self
            .send_without_body(
                self.client.delete(self.endpoint("records")).json(query),
                "DELETE records",
            )
            .await;
        match result {
            Err(SkapiError::NotFound(_)) => Err(SkapiError::NotFound(query.record_id.to_string())),
            other => other,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct PostRecordRequest<'a> {
    data: &'a Value,
    table: &'a TableRef,
    tags: &'a [String],
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a RecordQuery,
    options: &'a FetchOptions,
}
