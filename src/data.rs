use crate::error::DataError;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

// movie (id PK, name, release_year, filming_location, directors: [director id],
//        genres: [genre id])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub name: String,
    pub release_year: i32,
    pub filming_location: Address,
    pub directors: Vec<i32>,
    pub genres: Vec<i32>,
}

/// Street address of a filming set. The country is a plain name here, not a
/// foreign key into `countries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: i32,
    pub country: String,
}

// director (id PK, name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Director {
    pub id: i32,
    pub name: String,
}

// genre (id PK, name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

// critic (id PK, name, age, country: country id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Critic {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub country: i32,
}

// country (id PK, name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i32,
    pub name: String,
}

// rating (movie: movie id, critic: critic id, score)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub movie: i32,
    pub critic: i32,
    pub score: i32,
}

/// The six relations, loaded once and never mutated afterwards. Every query
/// takes `&Dataset`; nothing in this crate writes to it post-load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub movies: Vec<Movie>,
    pub directors: Vec<Director>,
    pub genres: Vec<Genre>,
    pub critics: Vec<Critic>,
    pub countries: Vec<Country>,
    pub ratings: Vec<Rating>,
}

impl Dataset {
    pub fn from_json(doc: &str) -> Result<Self, DataError> {
        let db: Dataset = serde_json::from_str(doc)?;
        debug!(
            movies = db.movies.len(),
            directors = db.directors.len(),
            genres = db.genres.len(),
            critics = db.critics.len(),
            countries = db.countries.len(),
            ratings = db.ratings.len(),
            "dataset loaded"
        );
        Ok(db)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    pub fn director_index(&self) -> FxHashMap<i32, &Director> {
        self.directors.iter().map(|d| (d.id, d)).collect()
    }

    pub fn genre_index(&self) -> FxHashMap<i32, &Genre> {
        self.genres.iter().map(|g| (g.id, g)).collect()
    }

    pub fn critic_index(&self) -> FxHashMap<i32, &Critic> {
        self.critics.iter().map(|c| (c.id, c)).collect()
    }

    pub fn country_index(&self) -> FxHashMap<i32, &Country> {
        self.countries.iter().map(|c| (c.id, c)).collect()
    }

    /// All ratings referencing `movie_id`, in dataset order.
    pub fn ratings_for(&self, movie_id: i32) -> impl Iterator<Item = &Rating> {
        self.ratings.iter().filter(move |r| r.movie == movie_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "movies": [
            {
                "id": 1,
                "name": "Matrix",
                "release_year": 1999,
                "filming_location": { "street": "Av. Roca", "number": 3023, "country": "Argentina" },
                "directors": [2, 3],
                "genres": [1, 2]
            }
        ],
        "directors": [
            { "id": 2, "name": "Lana Wachowski" },
            { "id": 3, "name": "Lilly Wachowski" }
        ],
        "genres": [
            { "id": 1, "name": "Ciencia Ficcion" },
            { "id": 2, "name": "Accion" }
        ],
        "critics": [
            { "id": 1, "name": "Pablo Marmol", "age": 45, "country": 1 }
        ],
        "countries": [
            { "id": 1, "name": "Argentina" }
        ],
        "ratings": [
            { "movie": 1, "critic": 1, "score": 8 }
        ]
    }"#;

    #[test]
    fn parses_all_six_collections() {
        let db = Dataset::from_json(DOC).unwrap();
        assert_eq!(db.movies.len(), 1);
        assert_eq!(db.movies[0].directors, vec![2, 3]);
        assert_eq!(db.movies[0].filming_location.country, "Argentina");
        assert_eq!(db.directors.len(), 2);
        assert_eq!(db.critics[0].country, 1);
        assert_eq!(db.ratings[0].score, 8);
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(matches!(
            Dataset::from_json("{ \"movies\": 7 }"),
            Err(DataError::Json(_))
        ));
    }

    #[test]
    fn indexes_key_by_id() {
        let db = Dataset::from_json(DOC).unwrap();
        assert_eq!(db.director_index()[&3].name, "Lilly Wachowski");
        assert_eq!(db.genre_index()[&1].name, "Ciencia Ficcion");
        assert_eq!(db.country_index()[&1].name, "Argentina");
        assert!(!db.critic_index().contains_key(&99));
    }

    #[test]
    fn ratings_for_filters_by_movie() {
        let db = Dataset::from_json(DOC).unwrap();
        assert_eq!(db.ratings_for(1).count(), 1);
        assert_eq!(db.ratings_for(2).count(), 0);
    }
}
