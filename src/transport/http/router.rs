use crate::domain::book::{Book, BookSummary};
use crate::transport::http::handlers::{books, root};
use crate::transport::http::types::{ApiResponse, BookPayload, ResponseStatus};
use axum::http::{header, HeaderValue};
use axum::routing::{any, get, MethodRouter};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(OpenApi)]
#[openapi(
    paths(
        root::welcome_handler,
        root::favicon_handler,
        books::list_books_handler,
        books::create_book_handler,
        books::get_book_handler,
        books::update_book_handler,
        books::delete_book_handler
    ),
    components(schemas(ApiResponse, ResponseStatus, BookPayload, Book, BookSummary))
)]
#[allow(dead_code)]
pub struct ApiDoc;

fn collection_routes() -> MethodRouter<crate::transport::http::types::AppState> {
    get(books::list_books_handler)
        .post(books::create_book_handler)
        .head(books::method_not_allowed_handler)
        .fallback(books::method_not_allowed_handler)
}

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/", any(root::welcome_handler))
        .route("/favicon.ico", any(root::favicon_handler))
        .route("/books", collection_routes())
        .route("/books/", collection_routes())
        .route(
            "/books/:id",
            get(books::get_book_handler)
                .put(books::update_book_handler)
                .delete(books::delete_book_handler)
                .head(books::method_not_allowed_handler)
                .fallback(books::method_not_allowed_handler),
        )
        .fallback(root::route_not_found_handler)
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
