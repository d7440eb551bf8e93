use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";

/// Shape of `./config.json` and of the optional `window.__LAB_ACCESS_*` globals.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "SUPABASE_URL")]
    pub supabase_url: Option<String>,
    #[serde(default, alias = "SUPABASE_ANON_KEY")]
    pub supabase_anon_key: Option<String>,
}

/// Resolved backend coordinates used by every API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url, path)
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }
}

static BACKEND_CONFIG: OnceLock<BackendConfig> = OnceLock::new();

impl RuntimeConfig {
    fn is_complete(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }

    fn merge(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            supabase_url: self.supabase_url.or(fallback.supabase_url),
            supabase_anon_key: self.supabase_anon_key.or(fallback.supabase_anon_key),
        }
    }

    fn resolve(self) -> BackendConfig {
        BackendConfig::new(
            self.supabase_url
                .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            self.supabase_anon_key.unwrap_or_default(),
        )
    }
}

#[cfg(target_arch = "wasm32")]
mod globals {
    use super::RuntimeConfig;

    fn read_key(obj: &js_sys::Object, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(obj, &(*key).into())
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
                .and_then(|v| v.as_string())
        })
    }

    fn read_global(name: &str) -> Option<RuntimeConfig> {
        let w = web_sys::window()?;
        let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        let obj = js_sys::Object::from(any);
        Some(RuntimeConfig {
            supabase_url: read_key(&obj, &["SUPABASE_URL", "supabase_url"]),
            supabase_anon_key: read_key(&obj, &["SUPABASE_ANON_KEY", "supabase_anon_key"]),
        })
    }

    // window.__LAB_ACCESS_ENV (env.js) wins over window.__LAB_ACCESS_CONFIG.
    pub fn snapshot() -> RuntimeConfig {
        let env = read_global("__LAB_ACCESS_ENV").unwrap_or_default();
        let cfg = read_global("__LAB_ACCESS_CONFIG").unwrap_or_default();
        env.merge(cfg)
    }

    pub async fn fetch_config_json() -> Option<RuntimeConfig> {
        let origin = web_sys::window()?.location().origin().ok()?;
        let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
        if !resp.status().is_success() {
            return None;
        }
        resp.json::<RuntimeConfig>().await.ok()
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod globals {
    use super::RuntimeConfig;

    pub fn snapshot() -> RuntimeConfig {
        RuntimeConfig::default()
    }

    pub async fn fetch_config_json() -> Option<RuntimeConfig> {
        None
    }
}

pub async fn await_backend_config() -> BackendConfig {
    if let Some(cached) = BACKEND_CONFIG.get() {
        return cached.clone();
    }
    let mut runtime = globals::snapshot();
    if !runtime.is_complete() {
        if let Some(fetched) = globals::fetch_config_json().await {
            runtime = runtime.merge(fetched);
        }
    }
    if runtime.supabase_anon_key.is_none() {
        log::warn!("No anon key configured; backend requests will likely be rejected");
    }
    BACKEND_CONFIG.get_or_init(|| runtime.resolve()).clone()
}

pub async fn init() {
    let cfg = await_backend_config().await;
    log::info!("Runtime config initialized (backend: {})", cfg.url);
}
