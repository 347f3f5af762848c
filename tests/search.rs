//! Search and trending tests.
//!
//! Uses wiremock to mock the Kitsu API and checks the query strings sent.

use kitsuapi::{
    AgeRating, Anime, AnimeSubtype, Category, ClientConfig, KitsuClient, KitsuError,
    Manga, Search, SearchQuery, Season, Status,
};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> KitsuClient {
    KitsuClient::with_config(ClientConfig::default().with_base_url(server.uri())).unwrap()
}

fn collection(kind: &str, ids: &[&str]) -> serde_json::Value {
    let data: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "type": kind,
                "attributes": {"titles": {"en": format!("Title {id}")}, "canonicalName": format!("Name {id}")}
            })
        })
        .collect();
    serde_json::json!({"data": data, "meta": {"count": ids.len()}, "links": {}})
}

#[tokio::test]
async fn test_search_anime_sends_text_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("filter[text]", "cowboy bebop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection("anime", &["1", "5"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let results = client.search_anime("cowboy bebop").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "1");
    assert_eq!(results[1].title(), Some("Title 5"));
}

#[tokio::test]
async fn test_search_empty_result_is_empty_list() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/manga"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [],
            "meta": {"count": 0},
            "links": {"first": "https://kitsu.io/api/edge/manga?page%5Blimit%5D=10&page%5Boffset%5D=0"}
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let results = client.search_manga("zzzzzzzz").await.unwrap();
    assert!(results.is_empty());

    let first = Manga::search_first(&client, &SearchQuery::new("zzzzzzzz")).await.unwrap();
    assert!(first.is_none());
}

#[tokio::test]
async fn test_search_first_requests_single_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("filter[text]", "bebop"))
        .and(query_param("page[limit]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection("anime", &["1"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = SearchQuery::new("bebop").limit(10);
    let anime = Anime::search_first(&client, &query).await.unwrap();

    assert_eq!(anime.map(|a| a.id), Some("1".to_string()));
}

#[tokio::test]
async fn test_search_with_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("filter[season]", "spring"))
        .and(query_param("filter[seasonYear]", "2022"))
        .and(query_param("filter[status]", "finished"))
        .and(query_param("filter[subtype]", "TV"))
        .and(query_param("filter[ageRating]", "G,PG"))
        .and(query_param("filter[categories]", "adventure,space"))
        .and(query_param("page[limit]", "5"))
        .and(query_param("page[offset]", "10"))
        .and(query_param_is_missing("filter[text]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "42", "type": "anime", "attributes": {}}],
            "meta": {"count": 57},
            "links": {"next": "https://kitsu.io/api/edge/anime?page%5Blimit%5D=5&page%5Boffset%5D=15"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = SearchQuery::default()
        .season(Season::Spring)
        .season_year(2022)
        .status(Status::Finished)
        .anime_subtype(AnimeSubtype::Tv)
        .age_ratings(&[AgeRating::G, AgeRating::PG])
        .categories(&["adventure", "space"])
        .limit(5)
        .offset(10);
    let page = client.search_anime_with(&query).await.unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page.total, Some(57));
    assert!(page.has_more());
}

#[tokio::test]
async fn test_search_limit_is_clamped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("page[limit]", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection("anime", &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = SearchQuery::new("naruto").limit(500);
    let page = client.search_anime_with(&query).await.unwrap();
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_search_characters_uses_name_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/characters"))
        .and(query_param("filter[name]", "spike"))
        .and(query_param_is_missing("filter[text]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection("characters", &["1", "2", "3"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let characters = client.search_characters("spike").await.unwrap();

    assert_eq!(characters.len(), 3);
    assert_eq!(characters[2].name(), Some("Name 3"));
}

#[tokio::test]
async fn test_search_characters_with_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/characters"))
        .and(query_param("filter[name]", "faye"))
        .and(query_param("page[offset]", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection("characters", &["9"])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client
        .search_characters_with(&SearchQuery::new("faye").offset(20))
        .await
        .unwrap();
    assert_eq!(page.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["9"]);
}

#[tokio::test]
async fn test_search_includes_side_loaded_resources() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("include", "categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "1", "type": "anime"}],
            "included": [
                {"id": "150", "type": "categories", "attributes": {"title": "Space"}},
                {"id": "2", "type": "streamingLinks", "attributes": {}}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = client
        .search_anime_with(&SearchQuery::new("bebop").include("categories"))
        .await
        .unwrap();

    let categories: Vec<Category> = page.included().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].title(), Some("Space"));
    assert!(page.total.is_none());
}

#[tokio::test]
async fn test_next_page_follows_link() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/anime?filter%5Btext%5D=one&page%5Boffset%5D=10", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param_is_missing("page[offset]"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [{"id": "1", "type": "anime"}],
            "links": {"next": next}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("page[offset]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection("anime", &["11"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let first = client
        .search_anime_with(&SearchQuery::new("one"))
        .await
        .unwrap();
    assert!(first.has_more());

    let second = first.next_page(&client).await.unwrap().unwrap();
    assert_eq!(second.items[0].id, "11");
    assert!(second.next_page(&client).await.unwrap().is_none());
}

#[tokio::test]
async fn test_trending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/trending/anime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection("anime", &["1", "2"])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/trending/manga"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection("manga", &[])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let anime = client.trending_anime().await.unwrap();
    assert_eq!(anime.len(), 2);

    let manga = client.trending_manga().await.unwrap();
    assert!(manga.is_empty());
}

#[tokio::test]
async fn test_search_rejected_filter_is_bad_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "errors": [{"title": "Filter not allowed", "detail": "bogus is not allowed.", "code": "102", "status": "400"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = SearchQuery::new("x").filter("bogus", "1");
    let err = client.search_anime_with(&query).await.unwrap_err();

    match err {
        KitsuError::BadRequest { title, detail } => {
            assert_eq!(title.as_deref(), Some("Filter not allowed"));
            assert_eq!(detail, "bogus is not allowed.");
        }
        other => panic!("Expected BadRequest, got {other:?}"),
    }
}
