//! `Link` header construction for paginated collections.
//!
//! The next-page URL repeats the client's query string with `page`
//! replaced, so filters and page size carry over unchanged. Repeated keys
//! collapse to one entry holding the last value, at the position of the
//! first occurrence.

use crate::error::ApiError;

/// Build a `Link` header value pointing at `next_page` of `path`.
///
/// `raw_query` is the request's query string without the leading `?`.
/// The result has the form `<{path}?{query}>; rel="next"` with the query
/// form-urlencoded.
///
/// # Errors
///
/// Returns [`ApiError::InvalidQuery`] if `raw_query` is not a valid
/// urlencoded string.
pub fn next_link(path: &str, raw_query: Option<&str>, next_page: u32) -> Result<String, ApiError> {
    let pairs: Vec<(String, String)> = match raw_query {
        Some(query) => serde_urlencoded::from_str(query)
            .map_err(|e| ApiError::InvalidQuery(format!("malformed query string: {e}")))?,
        None => Vec::new(),
    };

    let mut params: Vec<(String, String)> = Vec::with_capacity(pairs.len().saturating_add(1));
    for (key, value) in pairs {
        match params.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => params.push((key, value)),
        }
    }

    let page = next_page.to_string();
    match params.iter_mut().find(|(key, _)| key == "page") {
        Some(slot) => slot.1 = page,
        None => params.push((String::from("page"), page)),
    }

    let query = serde_urlencoded::to_string(&params)
        .map_err(|e| ApiError::Internal(format!("failed to encode link query: {e}")))?;

    Ok(format!("<{path}?{query}>; rel=\"next\""))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn appends_page_when_absent() {
        let link = next_link("/api/v1/customers", None, 2).unwrap();
        assert_eq!(link, "</api/v1/customers?page=2>; rel=\"next\"");
    }

    #[test]
    fn replaces_page_in_place() {
        let link = next_link("/api/v1/items", Some("page=3&page_size=10"), 4).unwrap();
        assert_eq!(link, "</api/v1/items?page=4&page_size=10>; rel=\"next\"");
    }

    #[test]
    fn keeps_other_parameters_in_order() {
        let link = next_link(
            "/api/v1/orders",
            Some("start_date=2023-01-01&page_size=2&end_date=2023-01-31"),
            2,
        )
        .unwrap();
        assert_eq!(
            link,
            "</api/v1/orders?start_date=2023-01-01&page_size=2&end_date=2023-01-31&page=2>; rel=\"next\""
        );
    }

    #[test]
    fn repeated_keys_keep_last_value() {
        let link = next_link("/api/v1/items", Some("page_size=5&page=1&page_size=7"), 2).unwrap();
        assert_eq!(link, "</api/v1/items?page_size=7&page=2>; rel=\"next\"");
    }

    #[test]
    fn values_are_percent_encoded() {
        let link = next_link("/api/v1/items", Some("note=a%20b%26c"), 2).unwrap();
        assert_eq!(link, "</api/v1/items?note=a+b%26c&page=2>; rel=\"next\"");
    }

    #[test]
    fn empty_query_string_behaves_like_none() {
        let link = next_link("/api/v1/stores", Some(""), 2).unwrap();
        assert_eq!(link, "</api/v1/stores?page=2>; rel=\"next\"");
    }
}
