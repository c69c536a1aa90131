use std::sync::Arc;

use crate::{
    abstract_trait::{DynAuthService, DynCompanyService, DynRbacService, DynUserService},
    client::ApiClient,
    service::{AuthService, CompanyService, RbacService, UserService},
};

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub company_service: DynCompanyService,
    pub rbac_service: DynRbacService,
    pub user_service: DynUserService,
}

impl std::fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("auth_service", &"DynAuthService")
            .field("company_service", &"DynCompanyService")
            .field("rbac_service", &"DynRbacService")
            .field("user_service", &"DynUserService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let auth_service: DynAuthService = Arc::new(AuthService::new(client.clone()));
        let company_service: DynCompanyService = Arc::new(CompanyService::new(client.clone()));
        let rbac_service: DynRbacService = Arc::new(RbacService::new(client.clone()));
        let user_service: DynUserService = Arc::new(UserService::new(client));

        Self {
            auth_service,
            company_service,
            rbac_service,
            user_service,
        }
    }
}
