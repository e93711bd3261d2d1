//! Post creation and update. Both require a live API key.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use pulse_core::domain::Post;
use pulse_core::ports::BaseRepository;
use pulse_shared::ApiResponse;
use pulse_shared::dto::{PostRequest, PostResponse};

use super::present;
use crate::middleware::auth::authenticate;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_user_id: post.author_user_id,
        content: post.content,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (Some(api_key), Some(content)) = (present(req.api_key), present(req.content)) else {
        return Err(AppError::MissingFields);
    };

    let identity = authenticate(&state.sessions, &api_key).await?;

    let post = state
        .posts
        .insert(Post::new(identity.user_id, content))
        .await?;

    tracing::info!(post_id = %post.id, user_id = %identity.user_id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(post),
        "Post created successfully",
    )))
}

/// PUT /posts/{id}
///
/// Any key-holder may edit any post; authorship is recorded, not enforced.
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let (Some(api_key), Some(content)) = (present(req.api_key), present(req.content)) else {
        return Err(AppError::MissingFields);
    };
    let post_id = Uuid::parse_str(&path.into_inner())
        .map_err(|_| AppError::BadRequest("Invalid post id".to_string()))?;

    let identity = authenticate(&state.sessions, &api_key).await?;

    let mut post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    post.revise(content);
    let post = state.posts.update(post).await?;

    tracing::info!(post_id = %post.id, user_id = %identity.user_id, "Post updated");

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        to_response(post),
        "Post updated successfully",
    )))
}
