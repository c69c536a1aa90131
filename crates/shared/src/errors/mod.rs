mod client;
mod error;
mod http;

pub use self::client::{BoxError, ClientError, SESSION_EXPIRED_MESSAGE};
pub use self::error::{DEFAULT_ERROR_MESSAGE, ErrorResponse};
pub use self::http::HttpError;
