//! Identity provider seam and its Identity Toolkit REST implementation.

use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{IdToken, UserIdentity};
use crate::error::{AppResult, AuthError, NetworkError};
use crate::http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};

/// What a successful sign-in hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub user: UserIdentity,
    pub token: IdToken,
}

/// Credential obtained from a federated sign-in button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCredential {
    Google { id_token: String },
}

impl ProviderCredential {
    fn provider_id(&self) -> &'static str {
        match self {
            ProviderCredential::Google { .. } => "google.com",
        }
    }

    fn post_body(&self) -> String {
        match self {
            ProviderCredential::Google { id_token } => {
                format!("id_token={}&providerId={}", id_token, self.provider_id())
            }
        }
    }
}

#[async_trait(?Send)]
pub trait IdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthGrant>;
    /// Creates the account and sets its display name.
    async fn sign_up(&self, name: &str, email: &str, password: &str) -> AppResult<AuthGrant>;
    async fn sign_in_with(&self, credential: &ProviderCredential) -> AppResult<AuthGrant>;
    async fn update_display_name(&self, token: &IdToken, name: &str) -> AppResult<()>;
    /// Remote invalidation. The caller clears local state regardless.
    async fn sign_out(&self) -> AppResult<()>;
}

// =========================================================
// Identity Toolkit (REST)
// =========================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordBody<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody<'a> {
    id_token: &'a str,
    display_name: &'a str,
    return_secure_token: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IdpBody<'a> {
    post_body: &'a str,
    request_uri: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default, alias = "profilePicture")]
    photo_url: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
}

impl AccountResponse {
    fn into_grant(self) -> AppResult<AuthGrant> {
        let token = self
            .id_token
            .ok_or_else(|| NetworkError::malformed(None, "identity response without token"))?;
        Ok(AuthGrant {
            user: UserIdentity {
                uid: self.local_id,
                email: self.email,
                display_name: self.display_name.filter(|n| !n.trim().is_empty()),
                photo_url: self.photo_url.filter(|u| !u.trim().is_empty()),
            },
            token: IdToken::new(token),
        })
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct IdentityToolkit<C> {
    client: Rc<C>,
    endpoint: String,
    api_key: Option<String>,
    request_uri: String,
}

impl<C: HttpClient> IdentityToolkit<C> {
    pub fn new(client: Rc<C>, endpoint: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
            request_uri: "http://localhost".to_string(),
        }
    }

    /// Origin reported to the provider for federated sign-in.
    pub fn with_request_uri(mut self, uri: impl Into<String>) -> Self {
        self.request_uri = uri.into();
        self
    }

    async fn call<B: Serialize>(&self, action: &str, body: &B) -> AppResult<AccountResponse> {
        let key = self.api_key.as_deref().ok_or(AuthError::Misconfigured)?;
        let url = format!("{}/accounts:{}", self.endpoint, action);
        let req = HttpRequest::new(&url, HttpMethod::Post)
            .with_query([("key", key.to_string())])
            .with_header("Content-Type", "application/json")
            .with_json(body)
            .map_err(|e| NetworkError::malformed(None, e.to_string()))?;

        let res = self.client.send(req).await?;
        if !res.is_success() {
            return Err(rejection(&res));
        }
        res.json::<AccountResponse>()
            .map_err(|e| NetworkError::malformed(Some(res.status), e.to_string()).into())
    }
}

fn rejection(res: &HttpResponse) -> crate::error::AppError {
    match serde_json::from_str::<ErrorEnvelope>(&res.body) {
        Ok(envelope) => {
            let err = AuthError::from_code(&envelope.error.message);
            debug!(status = res.status, code = %envelope.error.message, "identity request rejected");
            err.into()
        }
        Err(_) => NetworkError::status(res.status, "Identity service error").into(),
    }
}

#[async_trait(?Send)]
impl<C: HttpClient> IdentityProvider for IdentityToolkit<C> {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthGrant> {
        let body = PasswordBody {
            email,
            password,
            return_secure_token: true,
        };
        self.call("signInWithPassword", &body).await?.into_grant()
    }

    async fn sign_up(&self, name: &str, email: &str, password: &str) -> AppResult<AuthGrant> {
        let body = PasswordBody {
            email,
            password,
            return_secure_token: true,
        };
        let mut grant = self.call("signUp", &body).await?.into_grant()?;

        // The account exists at this point; a failed rename must not undo it.
        match self.update_display_name(&grant.token, name).await {
            Ok(()) => grant.user.display_name = Some(name.to_string()),
            Err(err) => warn!(error = %err, "account created but display name not set"),
        }
        Ok(grant)
    }

    async fn sign_in_with(&self, credential: &ProviderCredential) -> AppResult<AuthGrant> {
        let post_body = credential.post_body();
        let body = IdpBody {
            post_body: &post_body,
            request_uri: &self.request_uri,
            return_secure_token: true,
        };
        self.call("signInWithIdp", &body).await?.into_grant()
    }

    async fn update_display_name(&self, token: &IdToken, name: &str) -> AppResult<()> {
        let body = UpdateBody {
            id_token: token.as_str(),
            display_name: name,
            return_secure_token: false,
        };
        self.call("update", &body).await.map(|_| ())
    }

    async fn sign_out(&self) -> AppResult<()> {
        // ID tokens are stateless; there is nothing to revoke server-side.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::http::MockHttpClient;
    use serde_json::json;

    const ENDPOINT: &str = "https://identity.test/v1";

    fn toolkit(mock: &Rc<MockHttpClient>, key: Option<&str>) -> IdentityToolkit<MockHttpClient> {
        IdentityToolkit::new(mock.clone(), ENDPOINT, key.map(str::to_string))
    }

    fn url(action: &str) -> String {
        format!("{ENDPOINT}/accounts:{action}")
    }

    #[tokio::test]
    async fn test_sign_in_parses_account() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Post,
            &url("signInWithPassword"),
            200,
            json!({"localId": "u1", "email": "a@b.in", "displayName": "Asha", "idToken": "tok"}),
        );

        let grant = toolkit(&mock, Some("k")).sign_in("a@b.in", "secret1").await.unwrap();
        assert_eq!(grant.user.uid, "u1");
        assert_eq!(grant.user.display_name.as_deref(), Some("Asha"));
        assert_eq!(grant.token.as_str(), "tok");

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.query, vec![("key".to_string(), "k".to_string())]);
    }

    #[tokio::test]
    async fn test_rejection_maps_provider_code() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Post,
            &url("signUp"),
            400,
            json!({"error": {"code": 400, "message": "EMAIL_EXISTS"}}),
        );

        let err = toolkit(&mock, Some("k"))
            .sign_up("Asha", "a@b.in", "secret1")
            .await
            .unwrap_err();
        assert_eq!(err, AppError::Auth(AuthError::EmailAlreadyInUse));
    }

    #[tokio::test]
    async fn test_missing_key_never_hits_network() {
        let mock = Rc::new(MockHttpClient::new());
        let err = toolkit(&mock, None).sign_in("a@b.in", "pw").await.unwrap_err();
        assert_eq!(err, AppError::Auth(AuthError::Misconfigured));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_sets_display_name() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Post,
            &url("signUp"),
            200,
            json!({"localId": "u2", "email": "n@b.in", "idToken": "tok2"}),
        );
        mock.mock_response(
            HttpMethod::Post,
            &url("update"),
            200,
            json!({"localId": "u2", "displayName": "Neel"}),
        );

        let grant = toolkit(&mock, Some("k"))
            .sign_up("Neel", "n@b.in", "secret1")
            .await
            .unwrap();
        assert_eq!(grant.user.display_name.as_deref(), Some("Neel"));
        assert_eq!(mock.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_rename_keeps_account() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Post,
            &url("signUp"),
            200,
            json!({"localId": "u3", "email": "x@b.in", "idToken": "tok3"}),
        );
        mock.mock_unreachable(HttpMethod::Post, &url("update"));

        let grant = toolkit(&mock, Some("k"))
            .sign_up("Xi", "x@b.in", "secret1")
            .await
            .unwrap();
        assert_eq!(grant.user.uid, "u3");
        assert_eq!(grant.user.display_name, None);
    }

    #[tokio::test]
    async fn test_google_credential_post_body() {
        let mock = Rc::new(MockHttpClient::new());
        mock.mock_response(
            HttpMethod::Post,
            &url("signInWithIdp"),
            200,
            json!({"localId": "g1", "email": "g@b.in", "photoUrl": "https://p", "idToken": "gt"}),
        );

        let credential = ProviderCredential::Google {
            id_token: "jwt".into(),
        };
        let grant = toolkit(&mock, Some("k"))
            .with_request_uri("https://listaria.in")
            .sign_in_with(&credential)
            .await
            .unwrap();
        assert_eq!(grant.user.photo_url.as_deref(), Some("https://p"));

        let sent = mock.last_request().unwrap();
        let Some(crate::http::HttpBody::Json(body)) = sent.body else {
            panic!("expected json body");
        };
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["postBody"], "id_token=jwt&providerId=google.com");
        assert_eq!(body["requestUri"], "https://listaria.in");
    }
}
