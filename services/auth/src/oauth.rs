//! OAuth2 sign-in for Google and Apple
//!
//! The auth provider runs the actual OAuth dance with Google/Apple. This side
//! only builds the authorize redirect and the PKCE pair that proves the
//! callback's code belongs to us.

use oauth2::{PkceCodeChallenge, PkceCodeVerifier};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

/// OAuth2 provider types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    Apple,
}

impl OAuthProvider {
    /// Get the provider name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Apple => "apple",
        }
    }
}

impl FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(OAuthProvider::Google),
            "apple" => Ok(OAuthProvider::Apple),
            other => Err(format!("Unsupported OAuth provider: {}", other)),
        }
    }
}

/// Authorization redirect plus the verifier needed to redeem its code
pub struct AuthorizeRequest {
    pub url: reqwest::Url,
    pub pkce_verifier: PkceCodeVerifier,
}

/// Build the provider's authorize URL with a fresh PKCE challenge
///
/// `authorize_endpoint` is the auth provider's `/authorize` URL;
/// `redirect_to` is where the user lands after signing in.
pub fn authorize_request(
    authorize_endpoint: reqwest::Url,
    provider: OAuthProvider,
    redirect_to: &str,
) -> AuthorizeRequest {
    info!("Generating authorization URL for {:?}", provider);

    let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

    let mut url = authorize_endpoint;
    url.query_pairs_mut()
        .append_pair("provider", provider.as_str())
        .append_pair("redirect_to", redirect_to)
        .append_pair("code_challenge", pkce_challenge.as_str())
        .append_pair("code_challenge_method", "s256");

    AuthorizeRequest { url, pkce_verifier }
}
