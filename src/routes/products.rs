use actix_web::{HttpResponse, Responder, delete, get, patch, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::products::{AddProductForm, UpdateProductForm};
use crate::repository::DieselRepository;
use crate::routes::error_response;
use crate::services::products;

#[get("/v1/products")]
/// Return a page of the public catalog with optional search and filters.
pub async fn list_products(
    params: web::Query<products::ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), params.0) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response("Failed to list products", err),
    }
}

#[get("/v1/products/{product_id}")]
/// Return a single live product.
pub async fn get_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::get_product(repo.get_ref(), path.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response("Failed to load product", err),
    }
}

#[post("/v1/products")]
/// Create a catalog product.
///
/// Users without the role stored in `crate::SERVICE_ACCESS_ROLE` receive a
/// `401 Unauthorized` response.
pub async fn create_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), &user, form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(product),
        Err(err) => error_response("Failed to create product", err),
    }
}

#[patch("/v1/products/{product_id}")]
/// Patch a catalog product.
pub async fn update_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Json<UpdateProductForm>,
) -> impl Responder {
    match products::update_product(repo.get_ref(), &user, path.into_inner(), form.into_inner()) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(err) => error_response("Failed to update product", err),
    }
}

#[delete("/v1/products/{product_id}")]
/// Archive a catalog product, hiding it from listings.
pub async fn archive_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::archive_product(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response("Failed to archive product", err),
    }
}
