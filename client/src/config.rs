use web_sys::{Document, Window};

pub const DEFAULT_UPLOAD_PATH: &str = "/upload";
pub const DEFAULT_CHAT_PATH: &str = "/chat";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub upload_url: String,
    pub chat_url: String,
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve("", None)
    }
}

impl ClientConfig {
    /// `search` is the location query string, `api_base` the optional
    /// `data-api-base` attribute of `<body>`.
    pub fn resolve(search: &str, api_base: Option<&str>) -> Self {
        let base = api_base.map(str::trim).unwrap_or("").trim_end_matches('/');
        Self {
            upload_url: format!("{base}{DEFAULT_UPLOAD_PATH}"),
            chat_url: format!("{base}{DEFAULT_CHAT_PATH}"),
            debug: debug_requested(search),
        }
    }

    pub fn from_page(window: &Window, document: &Document) -> Self {
        let search = window.location().search().ok().unwrap_or_default();
        let api_base = document
            .body()
            .and_then(|body| body.get_attribute("data-api-base"));
        Self::resolve(&search, api_base.as_deref())
    }
}

fn debug_requested(search: &str) -> bool {
    search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| matches!(pair, "debug=1" | "debug=true" | "log=1" | "log=true"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_same_origin_endpoints() {
        let config = ClientConfig::default();
        assert_eq!(config.upload_url, "/upload");
        assert_eq!(config.chat_url, "/chat");
        assert!(!config.debug);
    }

    #[test]
    fn api_base_prefixes_both_endpoints() {
        let config = ClientConfig::resolve("", Some("https://gpu.local:5000/"));
        assert_eq!(config.upload_url, "https://gpu.local:5000/upload");
        assert_eq!(config.chat_url, "https://gpu.local:5000/chat");
    }

    #[test]
    fn debug_flag_from_query() {
        assert!(ClientConfig::resolve("?debug=1", None).debug);
        assert!(ClientConfig::resolve("?lang=en&log=true", None).debug);
        assert!(!ClientConfig::resolve("?debug=0", None).debug);
        assert!(!ClientConfig::resolve("?nodebug=1", None).debug);
    }
}
