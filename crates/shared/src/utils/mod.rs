mod deserialize;
mod logs;
mod metrics;

pub use self::deserialize::{
    deserialize_id, deserialize_null_default, deserialize_nullable_string,
    deserialize_optional_id,
};
pub use self::logs::init_logger;
pub use self::metrics::{Method, Metrics, RefreshOutcome, Status, encode_registry};
