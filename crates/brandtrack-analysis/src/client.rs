use std::fmt::Display;
use std::future::Future;

/// A text-generation backend: composed query text in, generated text out.
///
/// Implementations make a single attempt per call; any error is treated as
/// terminal for the pair being processed.
pub trait QueryClient {
    type Error: Display;

    fn query(&self, context: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
