mod http;
mod traits;

pub use http::HttpEventsClient;
pub use traits::*;
