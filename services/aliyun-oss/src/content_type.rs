use http::Method;

/// Resolve the content type to sign and send for a request.
///
/// Only writes (`PUT` and `POST`) carry a content type. For them the MIME
/// type registered for the extension of `name`, then of `key`, wins over
/// the explicit `content_type`. Everything else resolves to an empty string.
pub fn resolve(
    method: &Method,
    content_type: Option<&str>,
    name: Option<&str>,
    key: &str,
) -> String {
    if *method != Method::PUT && *method != Method::POST {
        return String::new();
    }

    name.into_iter()
        .chain(Some(key))
        .find_map(guess)
        .or_else(|| content_type.map(str::to_string))
        .unwrap_or_default()
}

fn guess(name: &str) -> Option<String> {
    mime_guess::from_path(name).first().map(|v| v.to_string())
}
