//! URL mutations behind the sort/filter/search controls.
//!
//! Every change drops `offset`: a new filter always starts from the first
//! page. The links are followed with a history replace, so changing filters
//! never piles up back-button entries.

use url::form_urlencoded;

#[derive(Debug, Clone)]
pub struct FilterPanel {
    path: String,
    params: Vec<(String, String)>,
}

impl FilterPanel {
    pub fn new(path: &str, query: Option<&str>) -> Self {
        let params = query
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            path: path.to_string(),
            params,
        }
    }

    /// Location after setting `key` (a blank or missing value deletes it).
    pub fn set(&self, key: &str, value: Option<&str>) -> String {
        let mut params = self.params.clone();
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => set_param(&mut params, key, value),
            None => params.retain(|(k, _)| k != key),
        }
        self.location(params)
    }

    /// Location after deleting every key in `keys`.
    pub fn clear(&self, keys: &[&str]) -> String {
        let mut params = self.params.clone();
        params.retain(|(k, _)| !keys.contains(&k.as_str()));
        self.location(params)
    }

    fn location(&self, mut params: Vec<(String, String)>) -> String {
        params.retain(|(k, _)| k != "offset");
        if params.is_empty() {
            return self.path.clone();
        }
        let mut ser = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &params {
            ser.append_pair(k, v);
        }
        format!("{}?{}", self.path, ser.finish())
    }
}

/// Replace the first occurrence and drop the rest, or append.
fn set_param(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    match params.iter().position(|(k, _)| k == key) {
        Some(idx) => {
            params[idx].1 = value.to_string();
            let mut seen = 0;
            params.retain(|(k, _)| {
                if k != key {
                    return true;
                }
                seen += 1;
                seen == 1
            });
        }
        None => params.push((key.to_string(), value.to_string())),
    }
}
