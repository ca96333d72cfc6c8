use std::collections::{HashMap, HashSet};

use cinevote_model::{AnnotatedMovie, CatalogMovie, Vote};
use rayon::prelude::*;

/// Keeps the first entry of every title, in catalog order.
fn dedup_by_title(items: Vec<CatalogMovie>) -> Vec<CatalogMovie> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|movie| seen.insert(movie.title.clone()))
        .collect()
}

/// De-duplicates `items` and attaches the caller's vote to each survivor,
/// `0` where there is none.
///
/// The keep/drop decision is sequential; only the annotation runs on the
/// rayon pool, writing each result at its input index.
pub fn annotate_movies(
    items: Vec<CatalogMovie>,
    votes: &HashMap<String, Vote>,
) -> Vec<AnnotatedMovie> {
    let unique = dedup_by_title(items);
    let mut annotated = Vec::with_capacity(unique.len());

    // Runs inline on the async worker; pages hold at most MAX_PAGE_SIZE items.
    unique
        .into_par_iter()
        .map(|movie| {
            let voted = votes.get(&movie.title).map_or(0, |vote| i32::from(*vote));
            AnnotatedMovie::new(movie, voted)
        })
        .collect_into_vec(&mut annotated);

    annotated
}
