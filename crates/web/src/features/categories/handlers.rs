use axum::{Json, extract::Query};
use storage::{
    dto::category::{CategoryResponse, EligibleCategoriesQuery},
    models::all_categories,
    services::eligibility::eligible_categories,
};

#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Every category of both gender tracks", body = Vec<CategoryResponse>)
    ),
    tag = "categories"
)]
pub async fn list_categories() -> Json<Vec<CategoryResponse>> {
    Json(all_categories().map(CategoryResponse::from).collect())
}

#[utoipa::path(
    get,
    path = "/api/categories/eligible",
    params(EligibleCategoriesQuery),
    responses(
        (status = 200, description = "Categories the athlete may enter today", body = Vec<CategoryResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "categories"
)]
pub async fn list_eligible_categories(
    Query(query): Query<EligibleCategoriesQuery>,
) -> Json<Vec<CategoryResponse>> {
    let today = chrono::Utc::now().date_naive();

    Json(
        eligible_categories(query.birth_date, query.gender, today)
            .into_iter()
            .map(CategoryResponse::from)
            .collect(),
    )
}
