// Controller errors

use thiserror::Error;

use formguard_config::ConfigError;
use formguard_http_client::HttpClientError;
use formguard_i18n::I18nError;
use formguard_validation::RuleError;

/// Errors raised while setting a form up or changing its configuration.
///
/// Validation itself never fails; misconfigured rules surface as field
/// messages instead.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] RuleError),

    #[error("HTTP client error: {0}")]
    Http(#[from] HttpClientError),

    #[error("Translation error: {0}")]
    I18n(#[from] I18nError),
}

pub type Result<T> = std::result::Result<T, FormError>;
