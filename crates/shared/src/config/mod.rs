mod myconfig;

pub use self::myconfig::{ClientConfig, LogConfig};
