use std::env;

use navpath_core::ItemMerge;

pub const DEFAULT_URL: &str = "http://localhost:8000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the navigation service, without a trailing slash.
    pub base_url: String,
    pub item_merge: ItemMerge,
}

impl Default for Config {
    fn default() -> Self {
        Self { base_url: DEFAULT_URL.to_string(), item_merge: ItemMerge::default() }
    }
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: normalize_url(base_url.into()), ..Self::default() }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env::var("NAVPATH_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let item_merge = match env::var("NAVPATH_ITEM_MERGE") {
            Ok(s) => s.parse::<ItemMerge>().map_err(anyhow::Error::msg)?,
            Err(_) => ItemMerge::default(),
        };
        Ok(Self { base_url: normalize_url(base_url), item_merge })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn normalize_url(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}
