use middleware::extractor::ExtractionMiddleware;

pub mod middleware {
    pub mod extractor;
}

/// App-level claims extraction. Runs before the logger so request rows can
/// carry the user id, and before the dashboard auth guard consumes the
/// parsed result.
pub fn middleware() -> ExtractionMiddleware {
    ExtractionMiddleware::new()
}
