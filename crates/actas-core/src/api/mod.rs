//! Results API client.
//!
//! Uses the curl crate (libcurl) to POST one mesa code per request and hand
//! back the raw JSON body. The easy handle is reused so keep-alive
//! connections survive between mesas.

mod envelope;

pub use envelope::{decode_image, extract_payload, request_body};

use anyhow::{Context, Result};
use curl::easy::{Easy, List};

use crate::config::Config;
use crate::error::{classify_curl_error, FetchError};
use crate::roster::MesaId;

/// Anything that can return the JSON response for one mesa.
pub trait SheetSource {
    fn fetch(&mut self, id: MesaId) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP client for the results endpoint.
pub struct ApiClient {
    easy: Easy,
    request_field: String,
}

impl ApiClient {
    /// Configure a handle for `cfg.endpoint`: POST, JSON headers, timeouts.
    ///
    /// `cfg.timeout()` bounds the connect phase and any stall in the transfer
    /// (no bytes for that long). A slow response that keeps moving is not cut off.
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut easy = Easy::new();
        easy.url(&cfg.endpoint).context("invalid endpoint URL")?;
        easy.post(true)?;
        easy.follow_location(true)?;
        easy.connect_timeout(cfg.timeout())?;
        easy.low_speed_limit(1)?;
        easy.low_speed_time(cfg.timeout())?;
        easy.useragent(&cfg.user_agent)?;

        let mut list = List::new();
        list.append("accept: application/json")?;
        list.append("content-type: application/json")?;
        for (k, v) in &cfg.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;

        Ok(Self {
            easy,
            request_field: cfg.request_field.clone(),
        })
    }
}

impl SheetSource for ApiClient {
    fn fetch(&mut self, id: MesaId) -> Result<Vec<u8>, FetchError> {
        let body = request_body(&self.request_field, id);
        self.easy
            .post_fields_copy(&body)
            .map_err(classify_curl_error)?;

        let mut response = Vec::new();
        {
            let mut transfer = self.easy.transfer();
            transfer
                .write_function(|data| {
                    response.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(classify_curl_error)?;
            transfer.perform().map_err(classify_curl_error)?;
        }

        let code = self.easy.response_code().map_err(classify_curl_error)?;
        tracing::debug!(mesa = id, status = code, bytes = response.len(), "response received");
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        Ok(response)
    }
}
