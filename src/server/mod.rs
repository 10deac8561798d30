//! JSON API server over the post repository

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{PaginatedResult, Post, PostRepository};
use crate::theme::{FileThemeStore, Theme, ThemeStore};
use crate::Folio;

/// Client hint carrying the browser's color-scheme preference
const PREFERS_COLOR_SCHEME: &str = "sec-ch-prefers-color-scheme";

/// Server state
struct ServerState {
    repo: PostRepository,
    per_page: NonZeroUsize,
    theme_store: FileThemeStore,
    default_theme: Theme,
}

impl ServerState {
    fn current_theme(&self, prefers_dark: Option<bool>) -> Theme {
        Theme::resolve(self.theme_store.load(), prefers_dark, self.default_theme)
    }
}

/// Errors surfaced to API clients
#[derive(Debug)]
enum ApiError {
    NotFound,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Internal(message) => {
                tracing::error!("Request failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ThemeQuery {
    theme: Option<Theme>,
    prefers: Option<String>,
}

/// `Some(true)` for a dark preference, `Some(false)` for light, from the
/// `prefers` query parameter or else the color-scheme client hint
fn prefers_dark(headers: &HeaderMap, query: Option<&str>) -> Option<bool> {
    let raw = query.or_else(|| {
        headers
            .get(PREFERS_COLOR_SCHEME)
            .and_then(|value| value.to_str().ok())
    })?;
    match raw.trim().trim_matches('"') {
        "dark" => Some(true),
        "light" => Some(false),
        _ => None,
    }
}

/// Build the API router for a site
pub fn router(folio: &Folio) -> Router {
    let state = Arc::new(ServerState {
        repo: folio.repository(),
        per_page: folio.config.per_page,
        theme_store: folio.theme_store(),
        default_theme: folio.config.theme,
    });

    Router::new()
        .route("/api/posts", get(list_posts))
        .route("/api/posts/:slug", get(get_post))
        .route("/api/latest", get(latest_post))
        .route("/api/featured", get(featured_posts))
        .route("/api/tags", get(all_tags))
        .route("/api/tags/:tag", get(posts_by_tag))
        .route("/api/theme.css", get(theme_css))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the API server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let app = router(folio);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Serving posts from {:?}", folio.content_dir);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run a filesystem-bound repository query on the blocking pool
async fn blocking<T, F>(state: Arc<ServerState>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&ServerState) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&state))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

async fn list_posts(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PaginatedResult>, ApiError> {
    let page = match query.page.as_deref() {
        None => 1,
        Some(raw) => raw.parse::<usize>().map_err(|_| ApiError::NotFound)?,
    };

    let result = blocking(state, move |s| s.repo.paginate(page, s.per_page)).await?;

    // An empty blog still has a first page
    let empty_first_page = page == 1 && result.metadata.total_posts == 0;
    if result.is_out_of_range() && !empty_first_page {
        return Err(ApiError::NotFound);
    }

    Ok(Json(result))
}

async fn get_post(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Result<Json<Post>, ApiError> {
    blocking(state, move |s| s.repo.post(&slug))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn latest_post(State(state): State<Arc<ServerState>>) -> Result<Json<Post>, ApiError> {
    blocking(state, |s| s.repo.latest_post())
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn featured_posts(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(blocking(state, |s| s.repo.featured_posts()).await?))
}

async fn all_tags(State(state): State<Arc<ServerState>>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(blocking(state, |s| s.repo.all_tags()).await?))
}

async fn posts_by_tag(
    State(state): State<Arc<ServerState>>,
    Path(tag): Path<String>,
) -> Result<Json<Vec<Post>>, ApiError> {
    Ok(Json(
        blocking(state, move |s| s.repo.posts_by_tag(&tag)).await?,
    ))
}

async fn theme_css(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Query(query): Query<ThemeQuery>,
) -> Result<Response, ApiError> {
    let prefers_dark = prefers_dark(&headers, query.prefers.as_deref());
    let css = blocking(state, move |s| {
        let theme = query.theme.unwrap_or_else(|| s.current_theme(prefers_dark));
        s.repo.loader().renderer().theme_css(theme)
    })
    .await?
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::VARY, PREFERS_COLOR_SCHEME),
        ],
        css,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn site_with_posts(count: usize) -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        fs::create_dir_all(&folio.content_dir).unwrap();
        for i in 1..=count {
            let tag = if i % 2 == 0 { "AI" } else { "ai" };
            let featured = i == 1;
            fs::write(
                folio.content_dir.join(format!("post-{:02}.md", i)),
                format!(
                    "---\ntitle: Post {i}\ndate: 2024-01-{i:02}\nexcerpt: Excerpt {i}\ntags: [{tag}]\nfeatured: {featured}\n---\n## Heading {i}\n"
                ),
            )
            .unwrap();
        }
        (dir, folio)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_paginated_posts() {
        let (_dir, folio) = site_with_posts(25);

        let (status, json) = get_json(router(&folio), "/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["posts"].as_array().unwrap().len(), 10);
        assert_eq!(json["posts"][0]["slug"], "post-25");
        assert_eq!(json["metadata"]["totalPosts"], 25);
        assert_eq!(json["metadata"]["totalPages"], 3);
        assert_eq!(json["metadata"]["currentPage"], 1);
        assert_eq!(json["metadata"]["postsPerPage"], 10);

        let (status, json) = get_json(router(&folio), "/api/posts?page=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["posts"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_page_out_of_range_is_404() {
        let (_dir, folio) = site_with_posts(25);
        for uri in ["/api/posts?page=4", "/api/posts?page=0", "/api/posts?page=abc"] {
            let (status, _) = get_json(router(&folio), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_empty_site_first_page() {
        let (_dir, folio) = site_with_posts(0);
        let (status, json) = get_json(router(&folio), "/api/posts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["metadata"]["totalPages"], 0);

        let (status, _) = get_json(router(&folio), "/api/posts?page=2").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = get_json(router(&folio), "/api/latest").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_single_post() {
        let (_dir, folio) = site_with_posts(3);

        let (status, json) = get_json(router(&folio), "/api/posts/post-02").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["slug"], "post-02");
        assert_eq!(json["readingTime"], "1 min read");
        assert_eq!(json["author"], "Herman Teng");
        assert!(json["content"]
            .as_str()
            .unwrap()
            .contains(r#"<h2 id="heading-2">"#));

        let (status, _) = get_json(router(&folio), "/api/posts/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_tags_and_featured() {
        let (_dir, folio) = site_with_posts(4);

        let (_, tags) = get_json(router(&folio), "/api/tags").await;
        assert_eq!(tags, serde_json::json!(["AI", "ai"]));

        let (_, tagged) = get_json(router(&folio), "/api/tags/AI").await;
        let slugs: Vec<_> = tagged
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(slugs, vec!["post-04", "post-02"]);

        let (_, featured) = get_json(router(&folio), "/api/featured").await;
        assert_eq!(featured[0]["slug"], "post-01");

        let (_, latest) = get_json(router(&folio), "/api/latest").await;
        assert_eq!(latest["slug"], "post-04");
    }

    #[tokio::test]
    async fn test_theme_css() {
        let (_dir, folio) = site_with_posts(0);
        let response = router(&folio)
            .oneshot(
                Request::builder()
                    .uri("/api/theme.css?theme=dark")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/css; charset=utf-8"
        );
    }

    async fn get_css(app: Router, request: Request<Body>) -> String {
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn css_request(uri: &str, hint: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(hint) = hint {
            builder = builder.header(PREFERS_COLOR_SCHEME, hint);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_theme_css_follows_color_scheme_preference() {
        let (_dir, folio) = site_with_posts(0);
        let renderer = crate::content::MarkdownRenderer::new();
        let dark = renderer.theme_css(Theme::Dark).unwrap();
        let light = renderer.theme_css(Theme::Light).unwrap();
        assert_ne!(dark, light);

        let css = get_css(router(&folio), css_request("/api/theme.css", None)).await;
        assert_eq!(css, light);

        let css = get_css(
            router(&folio),
            css_request("/api/theme.css", Some("\"dark\"")),
        )
        .await;
        assert_eq!(css, dark);

        let css = get_css(router(&folio), css_request("/api/theme.css?prefers=dark", None)).await;
        assert_eq!(css, dark);

        folio.theme_store().save(Theme::Light).unwrap();
        let css = get_css(
            router(&folio),
            css_request("/api/theme.css?prefers=dark", None),
        )
        .await;
        assert_eq!(css, light);
    }

    #[test]
    fn test_prefers_dark_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(prefers_dark(&headers, None), None);
        assert_eq!(prefers_dark(&headers, Some("light")), Some(false));

        headers.insert(PREFERS_COLOR_SCHEME, "dark".parse().unwrap());
        assert_eq!(prefers_dark(&headers, None), Some(true));
        assert_eq!(prefers_dark(&headers, Some("light")), Some(false));
        assert_eq!(prefers_dark(&headers, Some("sepia")), None);
    }
}
