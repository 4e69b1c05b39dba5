use serde_json::Value;

/// Render a single filter value, or `None` if it cannot be sent.
///
/// Strings pass through untouched. Arrays keep only their string elements
/// and are comma-joined. Anything else is skipped.
fn build_query_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(","),
        ),
        _ => None,
    }
}

/// Build a `?k1=v1&k2=v2,v3` query string from ordered key/value pairs.
///
/// Parameters keep the iteration order of `params`. No percent-encoding is
/// applied. Returns an empty string when nothing survives filtering, even
/// for a non-empty mapping; other Qash clients emit a bare
/// `?` in that case. Both address the same resource.
pub fn build_query<K, V, I>(params: I) -> String
where
    K: AsRef<str>,
    V: std::borrow::Borrow<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    let built = params
        .into_iter()
        .filter_map(|(key, value)| {
            build_query_value(value.borrow()).map(|v| format!("{}={}", key.as_ref(), v))
        })
        .collect::<Vec<_>>();

    if built.is_empty() {
        String::new()
    } else {
        format!("?{}", built.join("&"))
    }
}
