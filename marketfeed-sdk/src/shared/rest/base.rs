use std::sync::Arc;

use reqwest::{
    Client, Method, Url,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::de::DeserializeOwned;

use super::{
    super::config::RestClientConfig,
    error::{RestApiError, Result},
};

/// How a provider expects its API key to be attached to requests.
#[derive(Clone, Copy, Debug)]
pub(crate) enum ApiKeyAuth {
    /// The key travels as a query parameter with the given name.
    QueryParam(&'static str),
    /// The key travels as a request header with the given name.
    Header(&'static str),
}

pub(crate) trait RestPath: Clone {
    fn to_path_string(self) -> String;
}

pub(crate) struct RestBase {
    base_url: String,
    api_key: String,
    auth: ApiKeyAuth,
    client: Client,
}

impl RestBase {
    pub fn new(
        config: RestClientConfig,
        base_url: String,
        api_key: String,
        auth: ApiKeyAuth,
    ) -> Result<Arc<Self>> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(RestApiError::HttpClient)?;

        Ok(Arc::new(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            auth,
            client,
        }))
    }

    fn get_url(&self, path: impl RestPath, query_params: &[(&str, String)]) -> Result<Url> {
        let url_str = format!("{}{}", self.base_url, path.to_path_string());
        let mut url = Url::parse(&url_str).map_err(|e| RestApiError::UrlParse(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query_params {
                pairs.append_pair(key, value);
            }
            if let ApiKeyAuth::QueryParam(key_param) = self.auth {
                pairs.append_pair(key_param, &self.api_key);
            }
        }

        Ok(url)
    }

    pub async fn get<T>(&self, path: impl RestPath, query_params: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.get_url(path, query_params)?;

        let mut headers = HeaderMap::new();
        if let ApiKeyAuth::Header(header_name) = self.auth {
            headers.insert(
                HeaderName::from_static(header_name),
                HeaderValue::from_str(&self.api_key)
                    .map_err(|e| RestApiError::UrlParse(e.to_string()))?,
            );
        }

        let response = self
            .client
            .request(Method::GET, url)
            .headers(headers)
            .send()
            .await
            .map_err(RestApiError::SendFailed)?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(RestApiError::ResponseDecoding)?;

            return Err(RestApiError::ErrorResponse { status, text });
        }

        let raw_response = response
            .text()
            .await
            .map_err(RestApiError::ResponseDecoding)?;

        let response_data = serde_json::from_str::<T>(&raw_response)
            .map_err(|e| RestApiError::ResponseJsonDeserializeFailed { raw_response, e })?;

        Ok(response_data)
    }
}
