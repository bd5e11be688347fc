//! Credential presence report
//!
//! The collector only uses public endpoints. At startup it reports which
//! credentials the environment carries so operators know the mode they run in.

use tracing::info;

const ACCESS_KEY: &str = "POLYMARKET_ACCESS_KEY";
const ACCESS_SECRETS: [&str; 2] = ["POLYMARKET_PRIVATE_KEY", "POLYMARKET_SECRET_KEY"];
const L2_KEYS: [&str; 5] = [
    "WALLET_ADDRESS",
    "POLY_API_KEY",
    "POLY_API_SECRET",
    "POLY_API_PASSPHRASE",
    "PK",
];

/// Which credential set the environment provides
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialMode {
    /// Access key plus a private or secret key
    AccessKey,
    /// Complete wallet + L2 API key set
    ApiKeys,
    /// Some of the L2 keys, `present` of `required`
    Partial { present: usize, required: usize },
    None,
}

impl CredentialMode {
    pub fn log(self) {
        match self {
            CredentialMode::AccessKey => info!("Loaded Polymarket API key credentials from .env"),
            CredentialMode::ApiKeys => info!("Loaded API credentials from .env"),
            CredentialMode::Partial { present, required } => info!(
                "Partial credentials in .env ({}/{} keys). Running read-only market data mode.",
                present, required
            ),
            CredentialMode::None => {
                info!("No trading credentials found. Running read-only market data mode.")
            }
        }
    }
}

/// Classify the credentials visible through `lookup` (blank values count as absent)
pub fn detect_credential_mode(lookup: impl Fn(&str) -> Option<String>) -> CredentialMode {
    let present = |key: &str| lookup(key).is_some_and(|v| !v.trim().is_empty());

    if present(ACCESS_KEY) && ACCESS_SECRETS.iter().any(|key| present(key)) {
        return CredentialMode::AccessKey;
    }

    let count = L2_KEYS.iter().filter(|key| present(key)).count();
    match count {
        0 => CredentialMode::None,
        n if n == L2_KEYS.len() => CredentialMode::ApiKeys,
        n => CredentialMode::Partial {
            present: n,
            required: L2_KEYS.len(),
        },
    }
}
