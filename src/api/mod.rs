use crate::models::NavigationConfig;
use crate::navigation::{ContentTypeEntity, FetchRequest};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
}

#[derive(Clone, Debug)]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: e.to_string(),
        }
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: ApiErrorKind::Parse,
            message: e.to_string(),
        }
    }

    fn unauthorized() -> Self {
        Self {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        }
    }

    fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        Self {
            kind: ApiErrorKind::Http,
            message: format!("{ctx} ({status}): {body}"),
        }
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

pub(crate) const DEFAULT_API_URL: &str = "http://localhost:1337";
pub(crate) const DEFAULT_SEARCH_DEBOUNCE_MS: i32 = 500;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub search_debounce_ms: i32,
}

fn read_env_key(env: &wasm_bindgen::JsValue, keys: &[&str]) -> Option<wasm_bindgen::JsValue> {
    keys.iter()
        .filter_map(|k| js_sys::Reflect::get(env, &(*k).into()).ok())
        .find(|v| !v.is_undefined() && !v.is_null())
}

impl EnvConfig {
    /// Read `window.ENV`, falling back to defaults for anything missing.
    ///
    /// Both README style (`API_URL`) and lowercase (`api_url`) keys are accepted.
    pub fn new() -> Self {
        let mut cfg = Self::default();

        let Some(env) = web_sys::window().and_then(|w| w.get("ENV")) else {
            return cfg;
        };
        let env: wasm_bindgen::JsValue = env.into();
        if env.is_undefined() || !env.is_object() {
            return cfg;
        }

        if let Some(url) = read_env_key(&env, &["API_URL", "api_url"]).and_then(|v| v.as_string())
        {
            cfg.api_url = url;
        }

        if let Some(ms) =
            read_env_key(&env, &["SEARCH_DEBOUNCE_MS", "search_debounce_ms"]).and_then(|v| v.as_f64())
        {
            if ms >= 0.0 {
                cfg.search_debounce_ms = ms.round() as i32;
            }
        }

        cfg
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

/// Path + query for one page of entities.
///
/// Plugin-owned types are served under the plugin's namespace. Drafts are included
/// so they can be linked (and labelled as such).
pub(crate) fn content_type_items_path(req: &FetchRequest) -> String {
    let mut path = String::from("/");
    if let Some(plugin) = req.plugin.as_deref().filter(|p| !p.is_empty()) {
        path.push_str(&urlencoding::encode(plugin));
        path.push('/');
    }
    path.push_str(&urlencoding::encode(&req.type_name));
    path.push_str("?_publicationState=preview");
    if let Some(q) = req.query.as_deref().filter(|q| !q.is_empty()) {
        path.push_str("&_q=");
        path.push_str(&urlencoding::encode(q));
    }
    path
}

#[derive(Clone, Debug)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
}

impl ApiClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_env(env: &EnvConfig) -> Self {
        Self::new(env.api_url.trim_end_matches('/').to_string())
    }

    async fn get_api<T: serde::de::DeserializeOwned>(&self, path: &str, ctx: &str) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.base_url, path);

        let res = client.get(url).send().await.map_err(ApiError::network)?;

        if res.status().is_success() {
            res.json().await.map_err(ApiError::parse)
        } else if res.status().as_u16() == 401 {
            Err(ApiError::unauthorized())
        } else {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::http(status, body, ctx))
        }
    }

    pub async fn get_config(&self) -> ApiResult<NavigationConfig> {
        self.get_api("/navigation/config", "Failed to load navigation config")
            .await
    }

    pub async fn get_content_type_items(
        &self,
        req: &FetchRequest,
    ) -> ApiResult<Vec<ContentTypeEntity>> {
        self.get_api(
            &content_type_items_path(req),
            &format!("Failed to load {} entities", req.type_name),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(type_name: &str, query: Option<&str>, plugin: Option<&str>) -> FetchRequest {
        FetchRequest {
            type_name: type_name.to_string(),
            query: query.map(str::to_string),
            plugin: plugin.map(str::to_string),
        }
    }

    #[test]
    fn test_items_path_without_plugin_or_query() {
        assert_eq!(
            content_type_items_path(&req("pages", None, None)),
            "/pages?_publicationState=preview"
        );
    }

    #[test]
    fn test_items_path_with_plugin_and_query() {
        assert_eq!(
            content_type_items_path(&req("posts", Some("rust & wasm"), Some("blog"))),
            "/blog/posts?_publicationState=preview&_q=rust%20%26%20wasm"
        );
    }

    #[test]
    fn test_items_path_ignores_empty_query() {
        assert_eq!(
            content_type_items_path(&req("pages", Some(""), Some(""))),
            "/pages?_publicationState=preview"
        );
    }

    #[test]
    fn test_api_client_from_env_trims_trailing_slash() {
        let env = EnvConfig {
            api_url: "http://cms.local/api/".to_string(),
            ..Default::default()
        };
        let client = ApiClient::from_env(&env);
        assert_eq!(client.base_url, "http://cms.local/api");
    }

    #[test]
    fn test_env_config_default() {
        let cfg = EnvConfig::default();
        assert_eq!(cfg.api_url, "http://localhost:1337");
        assert_eq!(cfg.search_debounce_ms, 500);
    }

    #[test]
    fn test_api_error_display() {
        let e = ApiError {
            kind: ApiErrorKind::Http,
            message: "boom".to_string(),
        };
        assert_eq!(e.to_string(), "boom");
        assert_eq!(ApiError::unauthorized().kind, ApiErrorKind::Unauthorized);
        assert_eq!(ApiError::parse("bad json").kind, ApiErrorKind::Parse);
    }
}
