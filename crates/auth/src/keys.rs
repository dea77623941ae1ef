//! ID token signing keys
//!
//! Firebase signs ID tokens with rotating RS256 keys published as a JWKS
//! document. Keys are fetched lazily, cached, and refetched when a token
//! names a `kid` the cache does not know, at most once per
//! `MIN_REFETCH_INTERVAL`.

use std::time::{Duration, Instant};

use jsonwebtoken::{jwk::JwkSet, Algorithm, DecodingKey};
use tokio::sync::RwLock;

use crate::error::AuthError;

/// Published signing keys of `securetoken@system.gserviceaccount.com`
pub const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Where ID token signing keys come from
#[derive(Clone)]
pub enum KeySource {
    /// RS256 keys from a JWKS endpoint (production)
    GoogleJwks { url: String },
    /// HS256 shared secret (auth emulator bridges, tests)
    SharedSecret(String),
}

impl std::fmt::Debug for KeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeySource::GoogleJwks { url } => f.debug_struct("GoogleJwks").field("url", url).finish(),
            KeySource::SharedSecret(_) => f.write_str("SharedSecret([REDACTED])"),
        }
    }
}

/// Shortest gap between two JWKS fetches
pub(crate) const MIN_REFETCH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Default)]
struct CachedKeys {
    set: Option<JwkSet>,
    last_fetch: Option<Instant>,
}

impl CachedKeys {
    fn lookup(&self, kid: &str) -> Option<Result<(DecodingKey, Algorithm), AuthError>> {
        self.set.as_ref().and_then(|set| set.find(kid)).map(decoding_key)
    }

    fn fetched_within(&self, interval: Duration) -> bool {
        self.last_fetch.is_some_and(|at| at.elapsed() < interval)
    }

    /// Answer for a `kid` the cache lacks while refetching is throttled
    fn throttled(&self) -> AuthError {
        match self.set {
            Some(_) => AuthError::InvalidToken,
            None => AuthError::KeyFetchFailed,
        }
    }
}

/// Resolves the decoding key for a token header
pub(crate) struct KeyStore {
    source: KeySource,
    http: reqwest::Client,
    cached: RwLock<CachedKeys>,
    min_refetch: Duration,
}

impl KeyStore {
    pub(crate) fn new(source: KeySource) -> Self {
        Self {
            source,
            http: reqwest::Client::new(),
            cached: RwLock::new(CachedKeys::default()),
            min_refetch: MIN_REFETCH_INTERVAL,
        }
    }

    #[cfg(test)]
    fn with_min_refetch(mut self, interval: Duration) -> Self {
        self.min_refetch = interval;
        self
    }

    /// Key and algorithm to verify a token carrying `kid`
    pub(crate) async fn key_for(
        &self,
        kid: Option<&str>,
    ) -> Result<(DecodingKey, Algorithm), AuthError> {
        let url = match &self.source {
            KeySource::SharedSecret(secret) => {
                return Ok((DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256));
            }
            KeySource::GoogleJwks { url } => url,
        };

        let kid = kid.ok_or(AuthError::InvalidToken)?;

        {
            let cached = self.cached.read().await;
            if let Some(key) = cached.lookup(kid) {
                return key;
            }
            if cached.fetched_within(self.min_refetch) {
                tracing::debug!(kid = %kid, "Signing key unknown, refetch throttled");
                return Err(cached.throttled());
            }
        }

        // Held across the fetch so concurrent misses share one request
        let mut cached = self.cached.write().await;
        if let Some(key) = cached.lookup(kid) {
            return key;
        }
        if cached.fetched_within(self.min_refetch) {
            return Err(cached.throttled());
        }

        tracing::debug!(kid = %kid, "Signing key not cached, fetching JWKS");
        cached.last_fetch = Some(Instant::now());
        cached.set = Some(self.fetch(url).await?);

        cached.lookup(kid).unwrap_or_else(|| {
            tracing::debug!(kid = %kid, "Token signed with unknown key");
            Err(AuthError::InvalidToken)
        })
    }

    async fn fetch(&self, url: &str) -> Result<JwkSet, AuthError> {
        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch signing keys");
            AuthError::KeyFetchFailed
        })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "Signing key endpoint returned an error");
            return Err(AuthError::KeyFetchFailed);
        }

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse signing keys");
            AuthError::KeyFetchFailed
        })
    }
}

fn decoding_key(jwk: &jsonwebtoken::jwk::Jwk) -> Result<(DecodingKey, Algorithm), AuthError> {
    let key = DecodingKey::from_jwk(jwk).map_err(|e| {
        tracing::error!(error = %e, "Unusable signing key");
        AuthError::KeyFetchFailed
    })?;
    Ok((key, Algorithm::RS256))
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! RSA test key: `testdata/signing_key.pem` and its public JWK

    pub(crate) const TEST_KID: &str = "test-key-1";
    pub(crate) const TEST_MODULUS: &str = "1dZHQaeunTXd4oOGwjwSPQjPOdbP-CirT-07k0UeZe_s_rDEnZZjlRV9jLUJhjAS9CUZzvsuRWB9acesuP1Ro_Ift_rmTpO7_5K6wrpVis0GOAqVr5qw_mtU5puQVVbPp4sp-Fp0IMKJdUn6c1CZyWh6ErZxnMvduUJYONLOgXPYOUstCSeJ0DsSO6ICDc3SR_Bi0DyEyerZDowNJRF9-K9T-38R8GVyitykGVsBvuDosQLQCzkz-jkwEaeFuRS9L_lI2LkNCE3R-MBulu0LAvcyDNJzcSYj-cmnqGlKmQ9c9LQjBlbBP44mEPtvbs93TCo0PC512z92xc9AO3i0Nw";

    pub(crate) fn jwks_body() -> serde_json::Value {
        serde_json::json!({
            "keys": [{
                "kty": "RSA",
                "alg": "RS256",
                "use": "sig",
                "kid": TEST_KID,
                "n": TEST_MODULUS,
                "e": "AQAB"
            }]
        })
    }

    pub(crate) fn signing_key() -> jsonwebtoken::EncodingKey {
        jsonwebtoken::EncodingKey::from_rsa_pem(include_bytes!("../testdata/signing_key.pem"))
            .expect("test key is valid PEM")
    }
}
