//! Inbound parameters on return from the payment provider
//!
//! The provider sends the payer back to the return URL with `token` (the
//! order id) and `PayerID`. Both present is the only signal to capture; a
//! cancelled payment comes back with `token` alone.

use crate::error::{ClientError, ClientResult};

pub const TOKEN_PARAM: &str = "token";
pub const PAYER_ID_PARAM: &str = "PayerID";

/// Query parameters seen on application start
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReturnParams {
    pub token: Option<String>,
    pub payer_id: Option<String>,
}

/// Order token and payer id of an approved payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReturn {
    pub token: String,
    pub payer_id: String,
}

impl ReturnParams {
    /// No inbound parameters: a fresh start
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(token: Option<String>, payer_id: Option<String>) -> Self {
        Self { token, payer_id }
    }

    /// Pick the parameters out of a full URL
    pub fn from_url(url: &str) -> ClientResult<Self> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| ClientError::Config(format!("invalid return URL '{url}': {e}")))?;
        Ok(Self::from_pairs(
            url.query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        ))
    }

    /// Pick the parameters out of decoded query pairs; first occurrence wins
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                TOKEN_PARAM if params.token.is_none() => params.token = Some(value),
                PAYER_ID_PARAM if params.payer_id.is_none() => params.payer_id = Some(value),
                _ => {}
            }
        }
        params
    }

    /// Both parameters, when both are present and non-empty
    pub fn payment_return(&self) -> Option<PaymentReturn> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        let payer_id = self.payer_id.as_deref().filter(|p| !p.is_empty())?;
        Some(PaymentReturn {
            token: token.to_string(),
            payer_id: payer_id.to_string(),
        })
    }
}
