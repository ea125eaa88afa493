use std::env;

use crate::ClickUpError;

pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2";
pub const TOKEN_ENV: &str = "CLICKUP_TOKEN";
pub const TEAM_ENV: &str = "CLICKUP_TEAM_ID";

/// Connection settings for the ClickUp API.
///
/// The token and team id are optional here so a client can be built before
/// configuration is complete; every call that needs them fails with
/// [`ClickUpError::Config`] before any request is sent.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub token: Option<String>,
    pub team_id: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            team_id: None,
        }
    }
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Settings read from `CLICKUP_TOKEN` and `CLICKUP_TEAM_ID`.
    pub fn from_env() -> Self {
        Self {
            token: env::var(TOKEN_ENV).ok(),
            team_id: env::var(TEAM_ENV).ok(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn token(&self) -> Result<&str, ClickUpError> {
        non_blank(self.token.as_deref()).ok_or_else(|| ClickUpError::Config(TOKEN_ENV.to_string()))
    }

    pub fn team_id(&self) -> Result<&str, ClickUpError> {
        non_blank(self.team_id.as_deref()).ok_or_else(|| ClickUpError::Config(TEAM_ENV.to_string()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_a_config_error() {
        let settings = ClientSettings::default().with_token("   ");
        assert!(matches!(settings.token(), Err(ClickUpError::Config(name)) if name == TOKEN_ENV));
    }

    #[test]
    fn token_is_trimmed() {
        let settings = ClientSettings::default().with_token(" pk_42 \n");
        assert_eq!(settings.token().unwrap(), "pk_42");
    }

    #[test]
    fn missing_team_is_a_config_error() {
        let settings = ClientSettings::default().with_token("pk_42");
        assert!(matches!(settings.team_id(), Err(ClickUpError::Config(name)) if name == TEAM_ENV));
    }
}
