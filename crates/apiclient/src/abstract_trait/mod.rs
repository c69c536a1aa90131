pub mod auth;
pub mod company;
pub mod rbac;
pub mod session;
pub mod transport;
pub mod user;

pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::company::{CompanyServiceTrait, DynCompanyService};
pub use self::rbac::{DynRbacService, RbacServiceTrait};
pub use self::session::{DynSessionStore, SessionStoreTrait};
pub use self::transport::{DynHttpTransport, HttpTransportTrait};
pub use self::user::{DynUserService, UserServiceTrait};
