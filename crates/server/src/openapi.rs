use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct CategoryRequest {
    pub description: String,
}

#[derive(ToSchema)]
pub struct ClientRequest {
    pub name: String,
    pub address: String,
}

#[derive(ToSchema)]
pub struct PhoneRequest {
    pub number: String,
    pub client_id: Option<i32>,
}

#[derive(ToSchema)]
pub struct SellRequest {
    pub client_id: Option<i32>,
    /// ISO-8601 date (YYYY-MM-DD)
    pub date: String,
}

#[derive(ToSchema)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub roles: Vec<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::auth::me,
        crate::routes::category::list,
        crate::routes::category::get,
        crate::routes::category::by_description,
        crate::routes::category::create,
        crate::routes::category::update,
        crate::routes::category::delete,
        crate::routes::client::list,
        crate::routes::client::get,
        crate::routes::client::by_name,
        crate::routes::client::create,
        crate::routes::client::update,
        crate::routes::client::delete,
        crate::routes::phone::list,
        crate::routes::phone::get,
        crate::routes::phone::by_number,
        crate::routes::phone::by_client,
        crate::routes::phone::create,
        crate::routes::phone::update,
        crate::routes::phone::delete,
        crate::routes::sell::list,
        crate::routes::sell::get,
        crate::routes::sell::by_client,
        crate::routes::sell::by_date,
        crate::routes::sell::by_date_between,
        crate::routes::sell::create,
        crate::routes::sell::update,
        crate::routes::sell::delete,
        crate::routes::user::list,
        crate::routes::user::get,
        crate::routes::user::by_name,
        crate::routes::user::by_email,
        crate::routes::user::create,
        crate::routes::user::update,
        crate::routes::user::delete,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            CategoryRequest,
            ClientRequest,
            PhoneRequest,
            SellRequest,
            UserRequest,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "category"),
        (name = "client"),
        (name = "phone"),
        (name = "sell"),
        (name = "user")
    )
)]
pub struct ApiDoc;
