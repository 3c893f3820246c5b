//! SAML login handshake
//!
//! The tenant has no token API for interactive users. A session is obtained
//! by walking the same pages a browser would: the tenant entry page, the
//! OAuth redirect, the identity provider logon form and the SAML assertion
//! callback. Every step consumes values scraped from the previous response.

use async_trait::async_trait;
use log::{debug, error, info};
use regex::Regex;
use reqwest::Url;
use std::fmt;
use std::sync::LazyLock;

use super::html;
use crate::config::{api, browser};
use crate::dwc::transport::{Transport, TransportResponse};
use crate::error::{DwcError, Result};

static SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"signature=(.*?);").expect("static regex is valid"));

static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"location\s*=\s*"([^"]*)""#).expect("static regex is valid"));

/// Hidden fields the identity provider logon form must carry
const LOGON_FIELDS: &[&str] = &[
    "authenticity_token",
    "idpSSOEndpoint",
    "RelayState",
    "SAMLRequest",
    "spId",
    "spName",
    "xsrfProtection",
];

/// Hidden fields of the assertion form posted back to the tenant
const ASSERTION_FIELDS: &[&str] = &["authenticity_token", "SAMLResponse", "RelayState"];

/// Position of a handshake in its strictly sequential flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    Init,
    RedirectReceived,
    IdpReached,
    CredentialsSubmitted,
    AssertionPosted,
    Authenticated,
    Failed,
}

impl fmt::Display for HandshakeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandshakeState::Init => "init",
            HandshakeState::RedirectReceived => "redirect-received",
            HandshakeState::IdpReached => "idp-reached",
            HandshakeState::CredentialsSubmitted => "credentials-submitted",
            HandshakeState::AssertionPosted => "assertion-posted",
            HandshakeState::Authenticated => "authenticated",
            HandshakeState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Result of a completed handshake
pub struct AuthenticatedSession {
    /// Transport holding the session cookies
    pub transport: Transport,
    /// Page that issues one-time passcodes for the external utility
    pub passcode_url: String,
}

/// Anything able to turn credentials into an authenticated session
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn login(
        &self,
        base_url: &str,
        user: &str,
        password: &str,
    ) -> Result<AuthenticatedSession>;
}

/// Browser-impersonating SAML login
#[derive(Debug, Default, Clone, Copy)]
pub struct SamlAuthClient;

#[async_trait]
impl AuthClient for SamlAuthClient {
    async fn login(
        &self,
        base_url: &str,
        user: &str,
        password: &str,
    ) -> Result<AuthenticatedSession> {
        let mut handshake = Handshake::new(base_url, user, password)?;
        handshake.run().await?;
        handshake.into_session()
    }
}

/// One login attempt; owns a fresh transport that is dropped on failure
pub struct Handshake {
    transport: Transport,
    base_url: String,
    user: String,
    password: String,
    state: HandshakeState,
    location: String,
    passcode_url: String,
    idp_url: String,
    assertion_page: String,
}

impl Handshake {
    pub fn new(base_url: &str, user: &str, password: &str) -> Result<Self> {
        Ok(Self {
            transport: Transport::new()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            user: user.to_string(),
            password: password.to_string(),
            state: HandshakeState::Init,
            location: String::new(),
            passcode_url: String::new(),
            idp_url: String::new(),
            assertion_page: String::new(),
        })
    }

    pub fn state(&self) -> HandshakeState {
        self.state
    }

    /// Drive the flow to `Authenticated`; any failure ends in `Failed`
    pub async fn run(&mut self) -> Result<()> {
        debug!("Starting login handshake against {}", self.base_url);

        while self.state != HandshakeState::Authenticated {
            let step = self.state;
            let outcome = match step {
                HandshakeState::Init => self.open_entry_page().await,
                HandshakeState::RedirectReceived => self.follow_redirect().await,
                HandshakeState::IdpReached => self.submit_credentials().await,
                HandshakeState::CredentialsSubmitted => self.post_assertion().await,
                HandshakeState::AssertionPosted => Ok(HandshakeState::Authenticated),
                HandshakeState::Authenticated | HandshakeState::Failed => {
                    Err(DwcError::Authentication(format!(
                        "handshake cannot continue from state '{}'",
                        step
                    )))
                }
            };

            match outcome {
                Ok(next) => {
                    debug!("Handshake step {} -> {}", step, next);
                    self.state = next;
                }
                Err(e) => {
                    error!("Login failed at step '{}': {}", step, e);
                    self.state = HandshakeState::Failed;
                    return Err(match e {
                        DwcError::Authentication(_) => e,
                        other => DwcError::Authentication(format!("step '{}': {}", step, other)),
                    });
                }
            }
        }

        info!("Logged in as {}", self.user);
        Ok(())
    }

    /// Hand over the transport once the flow completed
    pub fn into_session(self) -> Result<AuthenticatedSession> {
        if self.state != HandshakeState::Authenticated {
            return Err(DwcError::Authentication(format!(
                "handshake ended in state '{}'",
                self.state
            )));
        }
        Ok(AuthenticatedSession {
            transport: self.transport,
            passcode_url: self.passcode_url,
        })
    }

    /// GET the entry page; it carries the signature cookie and the redirect
    async fn open_entry_page(&mut self) -> Result<HandshakeState> {
        let url = format!("{}{}", self.base_url, api::AUTHENTICATE);
        let response = self.transport.get(&url).await?;

        let signature = html::capture(&response.body, &SIGNATURE)
            .ok_or_else(|| missing("signature", "entry page"))?;
        self.location = html::capture(&response.body, &LOCATION)
            .ok_or_else(|| missing("location", "entry page"))?;

        self.transport
            .add_cookie("fragmentAfterLogin", browser::FRAGMENT_AFTER_LOGIN, &self.base_url)?;
        self.transport
            .add_cookie("locationAfterLogin", browser::LOCATION_AFTER_LOGIN, &self.base_url)?;
        self.transport
            .add_cookie("signature", &signature, &self.base_url)?;

        Ok(HandshakeState::RedirectReceived)
    }

    /// Follow the OAuth redirect to the identity provider
    async fn follow_redirect(&mut self) -> Result<HandshakeState> {
        let response = self.transport.get(&self.location).await?;

        let oauth = self
            .location
            .find("/oauth")
            .ok_or_else(|| missing("/oauth", "redirect location"))?;
        let prefix = &self.location[..=oauth];
        self.passcode_url = format!("{}passcode", prefix);

        let href =
            html::first_link(&response.body).ok_or_else(|| missing("<a href>", "redirect page"))?;
        let redirect = if href.starts_with("http://") || href.starts_with("https://") {
            href
        } else {
            format!("{}{}", prefix, href.trim_start_matches('/'))
        };

        let response = self.transport.get(&redirect).await?;
        self.idp_url = response.url;

        Ok(HandshakeState::IdpReached)
    }

    /// Open the logon form and post the credentials with its hidden fields
    async fn submit_credentials(&mut self) -> Result<HandshakeState> {
        let page = self.transport.post_empty(&self.idp_url).await?;

        let mut form = scrape_fields(&page, LOGON_FIELDS, "logon page")?;
        form.extend([
            ("j_username", self.user.clone()),
            ("j_password", self.password.clone()),
            ("method", "GET".to_string()),
            ("mobileSSOToken", String::new()),
            ("org", String::new()),
            ("sourceUrl", String::new()),
            ("targetUrl", String::new()),
            ("tfaToken", String::new()),
            ("utf8", browser::UTF8_CHECK.to_string()),
        ]);

        let response = self.transport.post_form(&self.idp_url, &form).await?;
        self.assertion_page = response.body;

        Ok(HandshakeState::CredentialsSubmitted)
    }

    /// Post the SAML assertion to the callback named by the form action
    async fn post_assertion(&mut self) -> Result<HandshakeState> {
        let page = std::mem::take(&mut self.assertion_page);

        let action =
            html::form_action(&page).ok_or_else(|| missing("<form action>", "assertion page"))?;
        let callback = Url::parse(&self.idp_url)
            .and_then(|base| base.join(&action))
            .map_err(|e| {
                DwcError::Authentication(format!("invalid callback '{}': {}", action, e))
            })?;

        let mut form = Vec::with_capacity(ASSERTION_FIELDS.len() + 1);
        for field in ASSERTION_FIELDS {
            let value =
                html::named_value(&page, field).ok_or_else(|| missing(field, "assertion page"))?;
            form.push((*field, value));
        }
        form.push(("utf8", browser::UTF8_CHECK.to_string()));

        self.transport.post_form(callback.as_str(), &form).await?;

        Ok(HandshakeState::AssertionPosted)
    }
}

/// Collect the named hidden fields of a page
fn scrape_fields(
    page: &TransportResponse,
    fields: &[&'static str],
    page_name: &str,
) -> Result<Vec<(&'static str, String)>> {
    fields
        .iter()
        .map(|field| {
            html::named_value(&page.body, field)
                .map(|value| (*field, value))
                .ok_or_else(|| missing(field, page_name))
        })
        .collect()
}

fn missing(field: &str, page: &str) -> DwcError {
    DwcError::Authentication(format!("'{}' not found on {}", field, page))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LOGON_PAGE: &str = r#"<form method="post">
        <input type="hidden" name="authenticity_token" value="auth-1">
        <input type="hidden" name="idpSSOEndpoint" value="https://idp/sso">
        <input type="hidden" name="RelayState" value="relay-1">
        <input type="hidden" name="SAMLRequest" value="req-blob">
        <input type="hidden" name="spId" value="sp-1">
        <input type="hidden" name="spName" value="tenant">
        <input type="hidden" name="xsrfProtection" value="xsrf-1">
        </form>"#;

    /// Mount a complete, successful handshake on a mock server
    pub(crate) async fn mount_handshake(server: &MockServer, logon_page: &str) {
        let uri = server.uri();

        Mock::given(method("GET"))
            .and(path("/dwaas-ui/index.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "<script>document.cookie=\"signature=sig-42;path=/\";location=\"{}/oauth/authorize?x=1\"</script>",
                uri
            )))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/oauth/authorize"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"<a href="idp/landing">login</a>"#),
            )
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/idp/landing"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/idp/landing"))
            .and(body_string_contains("j_username=alice"))
            .and(body_string_contains("xsrfProtection=xsrf-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                r#"<form action="{}/saml/callback" method="post">
                   <input name="authenticity_token" value="auth-2">
                   <input name="SAMLResponse" value="assertion">
                   <input name="RelayState" value="relay-2"></form>"#,
                uri
            )))
            .with_priority(1)
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/idp/landing"))
            .respond_with(ResponseTemplate::new(200).set_body_string(logon_page.to_string()))
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/saml/callback"))
            .and(body_string_contains("SAMLResponse=assertion"))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }

    pub(crate) fn logon_page() -> &'static str {
        LOGON_PAGE
    }

    #[test]
    fn test_state_display() {
        assert_eq!(HandshakeState::IdpReached.to_string(), "idp-reached");
        assert_eq!(HandshakeState::Failed.to_string(), "failed");
    }

    #[tokio::test]
    async fn test_handshake_success() {
        let server = MockServer::start().await;
        mount_handshake(&server, LOGON_PAGE).await;

        let mut handshake = Handshake::new(&server.uri(), "alice", "secret").unwrap();
        handshake.run().await.unwrap();
        assert_eq!(handshake.state(), HandshakeState::Authenticated);

        let session = handshake.into_session().unwrap();
        assert_eq!(session.passcode_url, format!("{}/passcode", server.uri()));
    }

    #[tokio::test]
    async fn test_missing_logon_field_fails() {
        let server = MockServer::start().await;
        let page = LOGON_PAGE.replace("xsrfProtection", "somethingElse");
        mount_handshake(&server, &page).await;

        let mut handshake = Handshake::new(&server.uri(), "alice", "secret").unwrap();
        let result = handshake.run().await;

        match result {
            Err(DwcError::Authentication(msg)) => assert!(msg.contains("xsrfProtection")),
            other => panic!("Expected Authentication error, got {:?}", other),
        }
        assert_eq!(handshake.state(), HandshakeState::Failed);
        assert!(handshake.into_session().is_err());
    }

    #[tokio::test]
    async fn test_entry_page_without_signature_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dwaas-ui/index.html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nothing</html>"))
            .mount(&server)
            .await;

        let mut handshake = Handshake::new(&server.uri(), "alice", "secret").unwrap();
        assert!(handshake.run().await.is_err());
        assert_eq!(handshake.state(), HandshakeState::Failed);
    }

    #[tokio::test]
    async fn test_http_error_status_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/dwaas-ui/index.html"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = SamlAuthClient.login(&server.uri(), "alice", "secret").await;
        match result {
            Err(DwcError::Authentication(msg)) => assert!(msg.contains("503")),
            Err(other) => panic!("Expected Authentication error, got {:?}", other),
            Ok(_) => panic!("Expected failure"),
        }
    }
}
