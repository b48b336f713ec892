//! URL variant derivation for shared links.
//!
//! Two independent derivations, both pure functions of the input URL:
//! [`with_param`] rewrites the `dl=0` marker Dropbox puts on fresh links,
//! and [`model_variants`] produces the raw/download pair by reassembling the
//! query string. The latter is used when a URL is handed to the vision model,
//! which needs a directly fetchable image.

use reqwest::Url;

/// Display variant parameter: renders the object inline.
pub const RAW_PARAM: &str = "raw=1";

/// Download variant parameter: forces a browser download.
pub const DL_PARAM: &str = "dl=1";

/// Set a query parameter on a shared link.
///
/// If the URL carries a literal `?dl=0` or `&dl=0` marker, the `dl=0` is
/// replaced in place with `param`, preserving the separator character.
/// Otherwise `param` is appended with `&` when a query string already exists
/// and `?` when it does not.
pub fn with_param(url: &str, param: &str) -> String {
    for marker in ["?dl=0", "&dl=0"] {
        if url.contains(marker) {
            let sep = &marker[..1];
            return url.replacen(marker, &format!("{sep}{param}"), 1);
        }
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{url}{sep}{param}")
}

/// Derive the model-input (`raw=1`) and forced-download (`dl=1`) variants of
/// a shared link.
///
/// URLs whose host is not under `dropbox.com` pass through unchanged as both
/// outputs. Each variant is derived independently from the original query
/// string: the raw variant strips any `dl` parameter and sets `raw=1`, the
/// download variant strips any `raw` parameter and sets `dl=1`. Unrelated
/// parameters survive both derivations.
pub fn model_variants(url: &str) -> (String, String) {
    let Ok(parsed) = Url::parse(url) else {
        return (url.to_string(), url.to_string());
    };
    let dropbox_host = parsed
        .host_str()
        .is_some_and(|h| h == "dropbox.com" || h.ends_with(".dropbox.com"));
    if !dropbox_host {
        return (url.to_string(), url.to_string());
    }
    let raw = rewrite_query(&parsed, "dl", "raw");
    let download = rewrite_query(&parsed, "raw", "dl");
    (raw, download)
}

/// Rebuild the query with `strip` removed and `set=1` appended.
fn rewrite_query(parsed: &Url, strip: &str, set: &str) -> String {
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| k != strip && k != set)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut out = parsed.clone();
    {
        let mut pairs = out.query_pairs_mut();
        pairs.clear();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        pairs.append_pair(set, "1");
    }
    out.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_dl_zero_marker_in_place() {
        assert_eq!(
            with_param("https://x/y?dl=0", RAW_PARAM),
            "https://x/y?raw=1"
        );
        assert_eq!(
            with_param("https://x/y?a=1&dl=0", DL_PARAM),
            "https://x/y?a=1&dl=1"
        );
    }

    #[test]
    fn appends_when_no_marker() {
        assert_eq!(with_param("https://x/y", RAW_PARAM), "https://x/y?raw=1");
        assert_eq!(
            with_param("https://x/y?a=1", RAW_PARAM),
            "https://x/y?a=1&raw=1"
        );
    }

    #[test]
    fn non_dropbox_urls_pass_through() {
        let url = "https://store.example/f?dl=1";
        let (raw, dl) = model_variants(url);
        assert_eq!(raw, url);
        assert_eq!(dl, url);
    }

    #[test]
    fn dropbox_variants_strip_the_opposite_param() {
        let (raw, dl) = model_variants("https://www.dropbox.com/s/abc/f.jpg?dl=1");
        assert_eq!(raw, "https://www.dropbox.com/s/abc/f.jpg?raw=1");
        assert_eq!(dl, "https://www.dropbox.com/s/abc/f.jpg?dl=1");
    }

    #[test]
    fn unrelated_params_survive_both_derivations() {
        let (raw, dl) = model_variants("https://www.dropbox.com/s/abc/f.jpg?st=xyz&dl=0");
        assert_eq!(raw, "https://www.dropbox.com/s/abc/f.jpg?st=xyz&raw=1");
        assert_eq!(dl, "https://www.dropbox.com/s/abc/f.jpg?st=xyz&dl=1");
    }

    #[test]
    fn bare_dropbox_host_counts_as_storage_domain() {
        let (raw, _) = model_variants("https://dropbox.com/s/abc/f.jpg");
        assert_eq!(raw, "https://dropbox.com/s/abc/f.jpg?raw=1");
    }
}
