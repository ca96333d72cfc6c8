use std::collections::HashMap;
use std::sync::Arc;

use cinevote_model::{MAX_PAGE_SIZE, MovieListQuery, MovieListing, Vote, VoteRequest};
use tracing::{debug, info};
use uuid::Uuid;

use super::annotate::annotate_movies;
use crate::catalog::{CatalogGateway, CatalogQuery};
use crate::database::{Ballot, VoteStore};
use crate::error::{CoreError, Result};

pub const VOTE_RECORDED_MESSAGE: &str = "Vote recorded successfully";

/// Combines catalog pages with the caller's stored votes.
#[derive(Clone)]
pub struct MovieQueryService {
    catalog: Arc<dyn CatalogGateway>,
    votes: Arc<dyn VoteStore>,
}

impl std::fmt::Debug for MovieQueryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MovieQueryService").finish_non_exhaustive()
    }
}

impl MovieQueryService {
    pub fn new(catalog: Arc<dyn CatalogGateway>, votes: Arc<dyn VoteStore>) -> Self {
        Self { catalog, votes }
    }

    pub async fn list_movies(&self, user_id: Uuid, query: &MovieListQuery) -> Result<MovieListing> {
        if query.limit > MAX_PAGE_SIZE {
            return Err(CoreError::validation(format!(
                "limit must be less than or equal to {MAX_PAGE_SIZE}"
            )));
        }

        let page = self
            .catalog
            .fetch_movies(&CatalogQuery {
                skip: query.skip,
                limit: query.limit,
                query: query.query.clone(),
            })
            .await?;

        let votes: HashMap<String, Vote> = self
            .votes
            .list_by_user(user_id)
            .await?
            .into_iter()
            .map(|record| (record.title, record.vote))
            .collect();

        let received = page.items.len();
        let items = annotate_movies(page.items, &votes);
        debug!(
            %user_id,
            received,
            listed = items.len(),
            voted = votes.len(),
            "Annotated catalog page"
        );

        Ok(MovieListing {
            skip: query.skip,
            limit: query.limit,
            total: page.total,
            items,
        })
    }

    /// Records `request.user_vote` for the title, replacing any earlier vote
    /// by the same user on that title.
    pub async fn cast_vote(&self, user_id: Uuid, request: VoteRequest) -> Result<()> {
        let vote = Vote::try_from(request.user_vote)?;
        let ballot = Ballot {
            user_id,
            movie_id: request.movie_id,
            title: request.title,
            vote,
        };

        self.votes.upsert_vote(&ballot).await?;
        info!(%user_id, title = %ballot.title, vote = vote.value(), "Vote recorded");
        Ok(())
    }
}
