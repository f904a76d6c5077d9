use crate::error::RatingError;

const MAX_UPSTREAM_BODY_CHARS: usize = 200;

const SECRET_MARKERS: [&str; 6] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "api_key=",
    "access_token=",
    "\"api_key\":\"",
    "\"token\":\"",
];

fn is_secret_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '+' | '/' | '=')
}

fn redact_after(text: &mut String, marker: &str) {
    let mut search_from = 0;
    while let Some(rel) = text[search_from..].find(marker) {
        let value_start = search_from + rel + marker.len();
        let value_len: usize = text[value_start..]
            .chars()
            .take_while(|c| is_secret_char(*c))
            .map(char::len_utf8)
            .sum();
        if value_len == 0 {
            search_from = value_start;
            continue;
        }
        text.replace_range(value_start..value_start + value_len, "[REDACTED]");
        search_from = value_start + "[REDACTED]".len();
    }
}

/// Make an upstream body safe to log: one line, no credentials, bounded
/// length.
pub fn sanitize_upstream_body(body: &str) -> String {
    let mut cleaned: String = body
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    for marker in SECRET_MARKERS {
        redact_after(&mut cleaned, marker);
    }

    match cleaned.char_indices().nth(MAX_UPSTREAM_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &cleaned[..cut]),
        None => cleaned,
    }
}

/// Turn a non-success response into [`RatingError::Upstream`].
pub async fn upstream_error(response: reqwest::Response) -> RatingError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read upstream error body>".to_string());
    RatingError::Upstream {
        status,
        body: sanitize_upstream_body(&body),
    }
}
