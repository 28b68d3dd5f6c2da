/// Body written by [`hello`].
pub const GREETING: &str = "Hello, client";

/// Greets every caller; the request is not inspected.
pub async fn hello() -> &'static str {
    GREETING
}
