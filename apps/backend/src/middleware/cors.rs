use std::env;

use actix_cors::Cors;
use actix_web::http::header;

// String-level sanity check only; the browser enforces the rest.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

/// CORS policy for the API.
///
/// Allowed origins come from `CORS_ALLOWED_ORIGINS` (comma-separated,
/// e.g. `http://localhost:5173,https://blog.example.com`). With nothing
/// valid configured, only the usual local dev ports are allowed.
pub fn cors_middleware() -> Cors {
    let mut origins = parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());
    if origins.is_empty() {
        origins = vec![
            "http://localhost:5173".to_string(),
            "http://localhost:3000".to_string(),
        ];
    }

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        // Clients read the trace id off responses for support requests
        .expose_headers(vec![header::HeaderName::from_static("x-trace-id")])
        .max_age(3600);

    for origin in &origins {
        cors = cors.allowed_origin(origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::parse_origins;

    #[test]
    fn keeps_only_plausible_origins() {
        let parsed = parse_origins(
            "http://localhost:5173, null, , ftp://nope.example, https://blog.example.com",
        );
        assert_eq!(
            parsed,
            vec![
                "http://localhost:5173".to_string(),
                "https://blog.example.com".to_string()
            ]
        );
    }

    #[test]
    fn empty_input_parses_to_nothing() {
        assert!(parse_origins("").is_empty());
    }
}
