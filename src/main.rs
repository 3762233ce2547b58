use cineql::*;
use std::time::Instant;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/filmoteca.json".to_string());
    let db = data::Dataset::from_path(&path)?;
    info!(path = %path, "dataset ready");

    let start = Instant::now();

    println!(
        "average release year: {}",
        queries::average_release_year(&db)?
    );

    println!("movies with average rating above 6:");
    for movie in queries::movies_with_average_rating_above(&db, 6) {
        println!("  {} ({})", movie.name, movie.release_year);
    }

    println!("movies by Lana Wachowski:");
    for movie in queries::movies_by_director(&db, "Lana Wachowski") {
        println!("  {} ({})", movie.name, movie.release_year);
    }

    println!(
        "average rating for movie 3: {}",
        queries::average_rating_for_movie(&db, 3)?
    );

    println!("movies with an excellent rating:");
    for movie in queries::movies_with_excellent_rating(&db) {
        println!("  {} ({})", movie.name, movie.release_year);
    }

    if let Some(expanded) =
        queries::expand_movie_info(&db, "Indiana Jones y los cazadores del arca perdida")
    {
        println!("{}", serde_json::to_string_pretty(&expanded)?);
    }

    info!(elapsed_s = start.elapsed().as_secs_f32(), "queries done");

    Ok(())
}
