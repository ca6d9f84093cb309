// Client configuration.
// Selects the API deployment and carries timeout and session settings.

use std::time::Duration;

const KEMONO_API_BASE: &str = "https://kemono.su/api/v1";
const COOMER_API_BASE: &str = "https://coomer.su/api/v1";
const KEMONO_ICON_BASE: &str = "https://img.kemono.su/icons";
const COOMER_ICON_BASE: &str = "https://img.coomer.su/icons";

const DEFAULT_USER_AGENT: &str = concat!("kcnotif/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One of the two deployments serving the same API shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deployment {
    #[default]
    Kemono,
    Coomer,
}

impl Deployment {
    pub fn api_base(&self) -> &'static str {
        match self {
            Deployment::Kemono => KEMONO_API_BASE,
            Deployment::Coomer => COOMER_API_BASE,
        }
    }

    /// URL of a creator's avatar on this deployment's image host.
    pub fn icon_url(&self, service: &str, creator_id: &str) -> String {
        let base = match self {
            Deployment::Kemono => KEMONO_ICON_BASE,
            Deployment::Coomer => COOMER_ICON_BASE,
        };
        format!("{}/{}/{}", base, service, creator_id)
    }
}

/// Settings for a [`ResourceClient`](crate::api::ResourceClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root; every request path is relative to it.
    pub base_url: String,
    pub user_agent: String,
    /// Applied to every request unless the call overrides it.
    /// `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    /// Session token sent as the `session` cookie.
    pub session: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            session: None,
        }
    }

    pub fn for_deployment(deployment: Deployment) -> Self {
        Self::new(deployment.api_base())
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_deployment(Deployment::default())
    }
}
