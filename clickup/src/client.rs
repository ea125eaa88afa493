use reqwest::{header, Method};
use serde_json::Value;
use thiserror::Error;

use crate::{
    domain::{DataEnvelope, RawTimeEntry, StartTimerPayload},
    ClickUpURL, ClientSettings,
};

#[derive(Debug, Clone)]
pub struct ClickUpClient {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl ClickUpClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Perform one authenticated request against the API.
    ///
    /// Success with an empty or non-JSON body yields `Value::Null`; several
    /// endpoints (stop, delete) answer without a payload.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClickUpError> {
        let token = self.settings.token()?;
        let url = ClickUpURL::new(self.settings.base_url.as_str()).append_path(path);

        tracing::debug!(%method, path, "calling ClickUp");

        let mut request = self
            .http
            .request(method.clone(), url.as_ref())
            .header(header::AUTHORIZATION, token)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| ClickUpError::Transport(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ClickUpError::Transport(e.to_string()))?;
        let json = parse_body(&text);

        if !status.is_success() {
            let message = match json {
                Some(json) => json.to_string(),
                None => text,
            };
            return Err(ClickUpError::Remote {
                status: status.as_u16(),
                method: method.to_string(),
                path: path.to_string(),
                message,
            });
        }

        if json.is_none() && !text.trim().is_empty() {
            tracing::warn!(%method, path, "ClickUp returned a non-JSON success body");
        }

        Ok(json.unwrap_or(Value::Null))
    }

    fn team_path(&self, suffix: &str) -> Result<ClickUpURL, ClickUpError> {
        let team_id = self.settings.team_id()?;
        Ok(ClickUpURL::new(format!("/team/{}", urlencoding::encode(team_id))).append_path(suffix))
    }

    /// `GET /team/{team_id}/time_entries/current`. `None` unless `data.id` is present.
    pub async fn current_time_entry(&self) -> Result<Option<RawTimeEntry>, ClickUpError> {
        let path = self.team_path("time_entries/current")?;
        let resp = self.call(Method::GET, path.as_ref(), None).await?;

        Ok(DataEnvelope::new(resp)
            .data::<RawTimeEntry>()
            .filter(|entry| entry.id.is_some()))
    }

    /// `GET /team/{team_id}/time_entries` bounded by epoch milliseconds.
    pub async fn time_entries(
        &self,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Vec<RawTimeEntry>, ClickUpError> {
        let path = self
            .team_path("time_entries")?
            .with_query("start_date", start_ms)
            .with_query("end_date", end_ms);
        let resp = self.call(Method::GET, path.as_ref(), None).await?;

        Ok(DataEnvelope::new(resp).data_list())
    }

    /// `POST /team/{team_id}/time_entries/start` with `{"tid": ...}`.
    pub async fn start_timer(&self, task_id: &str) -> Result<Option<RawTimeEntry>, ClickUpError> {
        let path = self.team_path("time_entries/start")?;
        let body = serde_json::to_value(StartTimerPayload::new(task_id))
            .map_err(|e| ClickUpError::Transport(e.to_string()))?;
        let resp = self.call(Method::POST, path.as_ref(), Some(&body)).await?;

        Ok(DataEnvelope::new(resp).data())
    }

    /// `POST /team/{team_id}/time_entries/stop`.
    pub async fn stop_timer(&self) -> Result<Option<RawTimeEntry>, ClickUpError> {
        let path = self.team_path("time_entries/stop")?;
        let resp = self.call(Method::POST, path.as_ref(), None).await?;

        Ok(DataEnvelope::new(resp).data())
    }

    /// `DELETE /team/{team_id}/time_entries/{timer_id}`.
    pub async fn delete_time_entry(&self, entry_id: &str) -> Result<(), ClickUpError> {
        let path =
            self.team_path(&format!("time_entries/{}", urlencoding::encode(entry_id)))?;
        self.call(Method::DELETE, path.as_ref(), None).await?;
        Ok(())
    }
}

fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    serde_json::from_str(text).ok()
}

#[derive(Error, Debug)]
pub enum ClickUpError {
    #[error("Missing configuration: {0}")]
    Config(String),
    #[error("HTTP {status} {method} {path}\n{message}")]
    Remote {
        status: u16,
        method: String,
        path: String,
        message: String,
    },
    #[error("TransportError: {0}")]
    Transport(String),
}
