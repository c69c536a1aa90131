use apiclient::state::AppState;
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::json;
use shared::{
    domain::requests::{
        CreateCompanyRequest, CreatePermissionRequest, CreateRoleRequest, LoginRequest,
        RegisterCompanyUserRequest, RegisterRequest, SearchUsersRequest, UpdateCompanyRequest,
        UpdateRoleRequest, UpdateUserRequest,
    },
    errors::ClientError,
};
use thiserror::Error;

const LOGIN_FAILED: &str = "Login failed. Please check your credentials and try again.";
const OPERATION_FAILED: &str = "Operation failed";

/// A failed command. API failures carry the text shown to the operator.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{message}")]
    Client {
        message: String,
        #[source]
        source: ClientError,
    },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn fail(fallback: &'static str) -> impl FnOnce(ClientError) -> CommandError {
    move |source| CommandError::Client {
        message: source.user_message(fallback),
        source,
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    let rendered = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    println!("{rendered}");
    Ok(())
}

fn done(action: &str) -> Result<(), CommandError> {
    print_json(&json!({ "status": action }))
}

#[derive(Args, Debug)]
pub struct CompanyFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    identifier: String,
    #[arg(long)]
    logo: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CompanyCommands {
    /// List companies
    #[command(alias = "ls")]
    List,
    /// Show one company
    Show { id: i64 },
    /// Create a company
    Create(CompanyFields),
    /// Replace a company's details
    Update {
        id: i64,
        #[command(flatten)]
        fields: CompanyFields,
    },
    /// Delete a company
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum RoleCommands {
    /// List the roles of a company
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        company: i64,
    },
    /// Create a role
    Create {
        #[arg(long)]
        company: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Rename or describe a role
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a role
    Delete { id: i64 },
    /// Replace the permissions of a role
    SetPermissions {
        id: i64,
        #[arg(long = "permission", value_delimiter = ',')]
        permissions: Vec<i64>,
    },
    /// Assign a user to a role
    Assign {
        id: i64,
        #[arg(long)]
        user: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum PermissionCommands {
    /// List the permissions of a company
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        company: i64,
    },
    /// Create a permission under a role
    Create {
        #[arg(long)]
        company: i64,
        #[arg(long)]
        role: i64,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Show the module actions granted by a permission
    ModuleActions { id: i64 },
    /// Replace the module actions granted by a permission
    SetModuleActions {
        id: i64,
        #[arg(long = "action", value_delimiter = ',')]
        actions: Vec<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List the users of a company
    #[command(alias = "ls")]
    List {
        #[arg(long)]
        company: i64,
    },
    /// Search the users of a company
    Search {
        #[arg(long)]
        company: i64,
        #[arg(short, long)]
        query: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Register a user in a company
    Register {
        #[arg(long)]
        company: i64,
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "API_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        main: bool,
    },
    /// Change a user's details
    Update {
        id: i64,
        #[arg(long)]
        company: i64,
        #[arg(short, long)]
        username: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Remove a user from a company
    Delete {
        id: i64,
        #[arg(long)]
        company: i64,
    },
}

pub async fn login(
    state: &AppState,
    username: String,
    password: String,
) -> Result<(), CommandError> {
    let auth = &state.di_container.auth_service;
    auth.login(&LoginRequest::new(username, password))
        .await
        .map_err(fail(LOGIN_FAILED))?;
    done("signed in")
}

pub async fn register(
    state: &AppState,
    username: String,
    password: String,
    confirm_password: String,
    phone: String,
) -> Result<(), CommandError> {
    let request = RegisterRequest {
        username,
        password,
        confirm_password,
        phone,
    };
    state
        .di_container
        .auth_service
        .register(&request)
        .await
        .map_err(fail("Registration failed"))?;
    done("registered")
}

pub async fn logout(state: &AppState) -> Result<(), CommandError> {
    state
        .di_container
        .auth_service
        .logout()
        .await
        .map_err(fail(OPERATION_FAILED))?;
    done("signed out")
}

pub async fn status(state: &AppState) -> Result<(), CommandError> {
    let authenticated = state.di_container.auth_service.is_authenticated().await;
    print_json(&json!({
        "authenticated": authenticated,
        "base_url": state.config.base_url,
        "session_file": state.config.session_file.display().to_string(),
    }))
}

pub async fn companies(state: &AppState, command: CompanyCommands) -> Result<(), CommandError> {
    let service = &state.di_container.company_service;
    match command {
        CompanyCommands::List => {
            let companies = service
                .list()
                .await
                .map_err(fail("Failed to fetch companies"))?;
            print_json(&companies)
        }
        CompanyCommands::Show { id } => {
            let company = service
                .find_by_id(id)
                .await
                .map_err(fail("Failed to fetch company"))?;
            print_json(&company)
        }
        CompanyCommands::Create(fields) => {
            let request = CreateCompanyRequest {
                name: fields.name,
                email: fields.email,
                phone: fields.phone,
                address: fields.address,
                identifier: fields.identifier,
                logo: fields.logo,
            };
            let company = service
                .create(&request)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            print_json(&company)
        }
        CompanyCommands::Update { id, fields } => {
            let request = UpdateCompanyRequest {
                name: fields.name,
                email: fields.email,
                phone: fields.phone,
                identifier: fields.identifier,
                address: Some(fields.address),
                logo: fields.logo,
            };
            let company = service
                .update(id, &request)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            print_json(&company)
        }
        CompanyCommands::Delete { id } => {
            service.delete(id).await.map_err(fail(OPERATION_FAILED))?;
            done("deleted")
        }
    }
}

pub async fn roles(state: &AppState, command: RoleCommands) -> Result<(), CommandError> {
    let service = &state.di_container.rbac_service;
    match command {
        RoleCommands::List { company } => {
            let roles = service
                .list_roles(company)
                .await
                .map_err(fail("Failed to fetch roles"))?;
            print_json(&roles)
        }
        RoleCommands::Create {
            company,
            name,
            description,
        } => {
            let request = CreateRoleRequest {
                company_id: company,
                name,
                description,
            };
            let role = service
                .create_role(&request)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            print_json(&role)
        }
        RoleCommands::Update {
            id,
            name,
            description,
        } => {
            let role = service
                .update_role(id, &UpdateRoleRequest { name, description })
                .await
                .map_err(fail(OPERATION_FAILED))?;
            print_json(&role)
        }
        RoleCommands::Delete { id } => {
            service
                .delete_role(id)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            done("deleted")
        }
        RoleCommands::SetPermissions { id, permissions } => {
            service
                .update_role_permissions(id, &permissions)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            done("updated")
        }
        RoleCommands::Assign { id, user } => {
            service
                .assign_user_to_role(id, user)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            done("assigned")
        }
    }
}

pub async fn permissions(
    state: &AppState,
    command: PermissionCommands,
) -> Result<(), CommandError> {
    let service = &state.di_container.rbac_service;
    match command {
        PermissionCommands::List { company } => {
            let permissions = service
                .list_permissions(company)
                .await
                .map_err(fail("Failed to fetch permissions"))?;
            print_json(&permissions)
        }
        PermissionCommands::Create {
            company,
            role,
            name,
            description,
        } => {
            let request = CreatePermissionRequest {
                company_id: company,
                role_id: role,
                name,
                description,
            };
            let permission = service
                .create_permission(&request)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            print_json(&permission)
        }
        PermissionCommands::ModuleActions { id } => {
            let actions = service
                .permission_module_actions(id)
                .await
                .map_err(fail("Failed to fetch module actions"))?;
            print_json(&actions)
        }
        PermissionCommands::SetModuleActions { id, actions } => {
            service
                .update_permission_module_actions(id, &actions)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            done("updated")
        }
    }
}

pub async fn module_actions(state: &AppState) -> Result<(), CommandError> {
    let actions = state
        .di_container
        .rbac_service
        .list_module_actions()
        .await
        .map_err(fail("Failed to fetch module actions"))?;
    print_json(&actions)
}

pub async fn users(state: &AppState, command: UserCommands) -> Result<(), CommandError> {
    let service = &state.di_container.user_service;
    match command {
        UserCommands::List { company } => {
            let users = service
                .list_users(company)
                .await
                .map_err(fail("Failed to fetch users"))?;
            print_json(&users)
        }
        UserCommands::Search {
            company,
            query,
            limit,
        } => {
            let request = SearchUsersRequest {
                company_id: company,
                query,
                limit,
            };
            let users = service
                .search_users(&request)
                .await
                .map_err(fail("Failed to fetch users"))?;
            print_json(&users)
        }
        UserCommands::Register {
            company,
            username,
            password,
            phone,
            main,
        } => {
            let request = RegisterCompanyUserRequest {
                username,
                password,
                phone,
                is_main: main,
            };
            let user = service
                .register_user(company, &request)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            print_json(&user)
        }
        UserCommands::Update {
            id,
            company,
            username,
            password,
            phone,
        } => {
            let request = UpdateUserRequest {
                username,
                password,
                phone,
            };
            let user = service
                .update_user(company, id, &request)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            print_json(&user)
        }
        UserCommands::Delete { id, company } => {
            service
                .delete_user(company, id)
                .await
                .map_err(fail(OPERATION_FAILED))?;
            done("deleted")
        }
    }
}

pub async fn metrics(state: &AppState) -> Result<(), CommandError> {
    let text = state.encode_metrics().await?;
    print!("{text}");
    Ok(())
}
