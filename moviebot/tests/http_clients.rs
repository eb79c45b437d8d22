//! Runs the real reqwest clients against a local axum server standing in for TMDB and YouTube.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json,
};
use moviebot::{
    ClientError, Genre, MetadataApi, MovieId, PersonId, TmdbClient, VideoApi, YoutubeClient,
};
use serde_json::{json, Value};

type Params = Query<HashMap<String, String>>;

const TMDB_KEY: &str = "tmdb-test-key";
const YOUTUBE_KEY: &str = "youtube-test-key";

async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn authorised(params: &HashMap<String, String>, param: &str, key: &str) -> Result<(), StatusCode> {
    if params.get(param).map(String::as_str) == Some(key) {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn discover(Query(params): Params) -> Result<Json<Value>, StatusCode> {
    authorised(&params, "api_key", TMDB_KEY)?;
    let genre = params.get("with_genres").cloned().unwrap_or_else(|| "any".to_owned());
    Ok(Json(json!({
        "page": 1,
        "results": [
            {"id": 11, "title": format!("First {}", genre)},
            {"id": 12, "title": "Second"}
        ]
    })))
}

async fn search_person(Query(params): Params) -> Result<Json<Value>, StatusCode> {
    authorised(&params, "api_key", TMDB_KEY)?;
    let results = match params.get("query").map(String::as_str) {
        Some("Michael Mann") => json!([{"id": 638, "name": "Michael Mann"}, {"id": 9999}]),
        _ => json!([]),
    };
    Ok(Json(json!({ "results": results })))
}

async fn credits(Path(id): Path<u64>, Query(params): Params) -> Result<Json<Value>, StatusCode> {
    authorised(&params, "api_key", TMDB_KEY)?;
    if id != 638 {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "id": 638,
        "cast": [{"title": "Cameo"}],
        "crew": [
            {"title": "Heat", "department": "Directing", "job": "Director"},
            {"title": "Heat", "department": "Writing", "job": "Writer"},
            {"title": "Collateral", "department": "Directing", "job": "Director"}
        ]
    })))
}

async fn details(Path(id): Path<u64>, Query(params): Params) -> Result<Json<Value>, StatusCode> {
    authorised(&params, "api_key", TMDB_KEY)?;
    Ok(Json(json!({
        "id": id,
        "overview": "A group of professional bank robbers...",
        "release_date": "1995-12-15",
        "runtime": 170,
        "genres": [{"id": 28, "name": "Action"}, {"id": 80, "name": "Crime"}, {"id": 18, "name": "Drama"}]
    })))
}

async fn youtube_search(Query(params): Params) -> Result<Json<Value>, StatusCode> {
    authorised(&params, "key", YOUTUBE_KEY)?;
    if params.get("part").map(String::as_str) != Some("snippet") {
        return Err(StatusCode::BAD_REQUEST);
    }
    let items = match params.get("q").map(String::as_str) {
        Some("Heat trailer") => json!([
            {"id": {"kind": "youtube#video", "videoId": "2GfZl4kuVNI"}},
            {"id": {"kind": "youtube#video", "videoId": "other"}}
        ]),
        _ => json!([]),
    };
    Ok(Json(json!({ "items": items })))
}

async fn tmdb_server() -> String {
    serve(
        axum::Router::new()
            .route("/3/discover/movie", get(discover))
            .route("/3/search/person", get(search_person))
            .route("/3/person/:id/movie_credits", get(credits))
            .route("/3/movie/:id", get(details)),
    )
    .await
}

fn tmdb(base: &str, key: &str) -> TmdbClient {
    TmdbClient::new(reqwest::Client::new(), format!("{}/3/", base), key)
}

#[tokio::test]
async fn discovery_sends_genre_filter_only_when_given() {
    let base = tmdb_server().await;
    let client = tmdb(&base, TMDB_KEY);

    let movies = client
        .discover_by_genre(Some(&Genre::parse("Crime").unwrap()))
        .await
        .unwrap();
    assert_eq!(movies.len(), 2);
    assert_eq!(movies[0].id, MovieId(11));
    assert_eq!(movies[0].title, "First 80");

    let movies = client.discover_by_genre(None).await.unwrap();
    assert_eq!(movies[0].title, "First any");
}

#[tokio::test]
async fn person_search_takes_the_first_hit() {
    let base = tmdb_server().await;
    let client = tmdb(&base, TMDB_KEY);

    assert_eq!(
        client.search_person("Michael Mann").await.unwrap(),
        Some(PersonId(638))
    );
    assert_eq!(client.search_person("Nobody At All").await.unwrap(), None);
}

#[tokio::test]
async fn credits_and_details_are_mapped() {
    let base = tmdb_server().await;
    let client = tmdb(&base, TMDB_KEY);

    let credits = client.credits_for_person(PersonId(638)).await.unwrap();
    assert_eq!(credits.acted_in(), vec!["Cameo"]);
    assert_eq!(credits.directed(), vec!["Heat", "Collateral"]);

    let details = client.movie_details(MovieId(949)).await.unwrap();
    assert_eq!(details.release_date.as_deref(), Some("1995-12-15"));
    assert_eq!(details.runtime_minutes, Some(170));
    assert_eq!(details.genres(), "Action, Crime, Drama");
}

#[tokio::test]
async fn error_statuses_surface_as_status_errors() {
    let base = tmdb_server().await;

    let err = tmdb(&base, "wrong-key").discover_by_genre(None).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(status) if status == reqwest::StatusCode::UNAUTHORIZED));

    let err = tmdb(&base, TMDB_KEY)
        .credits_for_person(PersonId(1))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Status(status) if status == reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn unreachable_service_is_a_request_error() {
    // Grab a free port, then close it again so nothing is listening there.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = tmdb(&format!("http://{}", addr), TMDB_KEY)
        .search_person("Anyone")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
}

#[tokio::test]
async fn request_errors_do_not_leak_api_keys() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let closed = format!("http://{}", addr);

    let err = tmdb(&closed, TMDB_KEY).search_person("x").await.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
    assert!(!err.to_string().contains(TMDB_KEY), "{}", err);

    let err = YoutubeClient::new(reqwest::Client::new(), closed, YOUTUBE_KEY)
        .find_trailer("Heat")
        .await
        .unwrap_err();
    assert!(!err.to_string().contains(YOUTUBE_KEY), "{}", err);

    // A body that is not JSON fails while decoding, after the request was sent.
    let base = serve(axum::Router::new().route("/search", get(|| async { "not json" }))).await;
    let err = YoutubeClient::new(reqwest::Client::new(), base, YOUTUBE_KEY)
        .find_trailer("Heat")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
    assert!(!err.to_string().contains(YOUTUBE_KEY), "{}", err);
}

#[tokio::test]
async fn trailer_search_returns_the_first_watch_url() {
    let base = serve(axum::Router::new().route("/youtube/v3/search", get(youtube_search))).await;
    let client = YoutubeClient::new(
        reqwest::Client::new(),
        format!("{}/youtube/v3", base),
        YOUTUBE_KEY,
    );

    assert_eq!(
        client.find_trailer("Heat").await.unwrap().as_deref(),
        Some("https://www.youtube.com/watch?v=2GfZl4kuVNI")
    );
    assert_eq!(client.find_trailer("Unknown Film").await.unwrap(), None);

    let wrong_key = YoutubeClient::new(
        reqwest::Client::new(),
        format!("{}/youtube/v3", base),
        "nope",
    );
    assert!(matches!(
        wrong_key.find_trailer("Heat").await,
        Err(ClientError::Status(_))
    ));
}
