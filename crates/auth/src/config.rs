//! Auth configuration, read from the environment at startup.

use core::str::FromStr;

/// `SameSite` policy for the refresh cookie, kept HTTP-framework-agnostic.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

impl FromStr for SameSitePolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSitePolicy::Strict),
            "lax" => Ok(SameSitePolicy::Lax),
            "none" => Ok(SameSitePolicy::None),
            _ => Err(()),
        }
    }
}

/// Token and cookie configuration.
///
/// The two token classes sign with independent secrets so leaking one does
/// not compromise the other.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSitePolicy,
    /// `None` makes the refresh cookie a session cookie.
    pub cookie_max_age_secs: Option<i64>,
}

impl AuthConfig {
    /// Load from the environment, falling back to insecure dev defaults.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
            tracing::warn!("ACCESS_TOKEN_SECRET not set; using insecure dev default");
            "dev-access-secret".to_string()
        });
        let refresh_secret = std::env::var("REFRESH_TOKEN_SECRET").unwrap_or_else(|_| {
            tracing::warn!("REFRESH_TOKEN_SECRET not set; using insecure dev default");
            "dev-refresh-secret".to_string()
        });

        Self {
            access_secret,
            refresh_secret,
            access_ttl_secs: env_i64("ACCESS_TOKEN_TTL_SECS", 900),
            refresh_ttl_secs: env_i64("REFRESH_TOKEN_TTL_SECS", 30 * 24 * 3600),
            cookie_secure: std::env::var("COOKIE_SECURE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            cookie_same_site: std::env::var("COOKIE_SAME_SITE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(SameSitePolicy::Lax),
            cookie_max_age_secs: std::env::var("COOKIE_MAX_AGE_SECS")
                .ok()
                .and_then(|v| v.parse().ok()),
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
