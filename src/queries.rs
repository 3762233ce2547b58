use crate::data::{Address, Country, Critic, Dataset, Director, Genre, Movie};
use crate::error::QueryError;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

/// A rating with at least this score counts as excellent.
pub const EXCELLENT_THRESHOLD: i32 = 9;

/// Floor of the arithmetic mean of `release_year` over all movies.
pub fn average_release_year(db: &Dataset) -> Result<i32, QueryError> {
    if db.movies.is_empty() {
        return Err(QueryError::EmptyDataset);
    }
    let sum: i64 = db.movies.iter().map(|m| i64::from(m.release_year)).sum();
    Ok(sum.div_euclid(db.movies.len() as i64) as i32)
}

/// Movies whose floor-truncated mean rating is strictly greater than
/// `threshold`, in dataset order. Movies with no ratings never qualify.
pub fn movies_with_average_rating_above(db: &Dataset, threshold: i32) -> Vec<&Movie> {
    let mut totals: FxHashMap<i32, (i64, i64)> = FxHashMap::default();
    for rating in &db.ratings {
        let (sum, count) = totals.entry(rating.movie).or_insert((0, 0));
        *sum += i64::from(rating.score);
        *count += 1;
    }

    db.movies
        .iter()
        .filter(|movie| {
            totals
                .get(&movie.id)
                .is_some_and(|&(sum, count)| sum.div_euclid(count) > i64::from(threshold))
        })
        .collect()
}

/// Movies credited to the first director whose name matches exactly.
/// An unknown director name yields an empty list, not an error.
pub fn movies_by_director<'a>(db: &'a Dataset, director_name: &str) -> Vec<&'a Movie> {
    let Some(director) = db.directors.iter().find(|d| d.name == director_name) else {
        return Vec::new();
    };

    db.movies
        .iter()
        .filter(|movie| movie.directors.contains(&director.id))
        .collect()
}

/// Floor-truncated mean score over the ratings of one movie.
pub fn average_rating_for_movie(db: &Dataset, movie_id: i32) -> Result<i32, QueryError> {
    let (sum, count) = db
        .ratings_for(movie_id)
        .fold((0i64, 0i64), |(sum, count), r| {
            (sum + i64::from(r.score), count + 1)
        });

    if count == 0 {
        return Err(QueryError::NoRatings { movie_id });
    }
    Ok(sum.div_euclid(count) as i32)
}

/// Movies with at least one rating of [`EXCELLENT_THRESHOLD`] or better.
/// Distinct, in dataset order; empty when nothing qualifies.
pub fn movies_with_excellent_rating(db: &Dataset) -> Vec<&Movie> {
    let excellent: FxHashSet<i32> = db
        .ratings
        .iter()
        .filter_map(|r| (r.score >= EXCELLENT_THRESHOLD).then_some(r.movie))
        .collect();

    db.movies
        .iter()
        .filter(|movie| excellent.contains(&movie.id))
        .collect()
}

/// A movie with its id lists resolved into full records: directors, genres,
/// and one [`Criticism`] per rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpandedMovie {
    pub id: i32,
    pub name: String,
    pub release_year: i32,
    pub filming_location: Address,
    pub directors: Vec<Director>,
    pub genres: Vec<Genre>,
    pub criticisms: Vec<Criticism>,
}

/// One rating of the expanded movie. `critic` is `None` when the rating
/// references a critic id missing from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criticism {
    pub score: i32,
    pub critic: Option<CriticProfile>,
}

/// A critic with the country foreign key resolved to its name. `country` is
/// `None` when the critic references a country id missing from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticProfile {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub country: Option<String>,
}

impl CriticProfile {
    fn new(critic: &Critic, countries: &FxHashMap<i32, &Country>) -> Self {
        CriticProfile {
            id: critic.id,
            name: critic.name.clone(),
            age: critic.age,
            country: countries.get(&critic.country).map(|c| c.name.clone()),
        }
    }
}

/// Expanded information for the first movie whose name matches exactly, or
/// `None` when no movie does. Director and genre records come back in
/// dataset order; criticisms in rating order. Director or genre ids with no
/// matching record are skipped.
pub fn expand_movie_info(db: &Dataset, movie_name: &str) -> Option<ExpandedMovie> {
    let movie = db.movies.iter().find(|m| m.name == movie_name)?;

    let directors: Vec<Director> = db
        .directors
        .iter()
        .filter(|d| movie.directors.contains(&d.id))
        .cloned()
        .collect();

    let genres: Vec<Genre> = db
        .genres
        .iter()
        .filter(|g| movie.genres.contains(&g.id))
        .cloned()
        .collect();

    let critics = db.critic_index();
    let countries = db.country_index();

    let criticisms: Vec<Criticism> = db
        .ratings_for(movie.id)
        .map(|rating| Criticism {
            score: rating.score,
            critic: critics
                .get(&rating.critic)
                .map(|critic| CriticProfile::new(critic, &countries)),
        })
        .collect();

    Some(ExpandedMovie {
        id: movie.id,
        name: movie.name.clone(),
        release_year: movie.release_year,
        filming_location: movie.filming_location.clone(),
        directors,
        genres,
        criticisms,
    })
}
