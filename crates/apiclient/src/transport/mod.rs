mod http_client;
mod request;

pub use self::http_client::ReqwestTransport;
pub use self::request::{ApiRequest, ApiResponse, Attempt};
