use axum::{Extension, Json, extract::State};
use cinevote_core::movies::VOTE_RECORDED_MESSAGE;
use cinevote_model::{MovieListQuery, MovieListing, User, VoteRequest, VoteResponse};

use super::extract::{ApiJson, ApiQuery};
use crate::infra::{app_state::AppState, errors::AppResult};

/// `GET /movies/?query=&limit=&skip=`
pub async fn list_movies_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ApiQuery(query): ApiQuery<MovieListQuery>,
) -> AppResult<Json<MovieListing>> {
    let listing = state.movies.list_movies(user.id, &query).await?;
    Ok(Json(listing))
}

/// `POST /movies/vote/`
pub async fn vote_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ApiJson(request): ApiJson<VoteRequest>,
) -> AppResult<Json<VoteResponse>> {
    state.movies.cast_vote(user.id, request).await?;
    Ok(Json(VoteResponse {
        message: VOTE_RECORDED_MESSAGE.to_string(),
    }))
}
