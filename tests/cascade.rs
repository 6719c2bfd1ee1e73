// file: tests/cascade.rs
// description: end-to-end material retrieval over mocked MediaWiki sources

use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use wiki_material::{
    Config, MaterialError, MaterialOutcome, MediaWikiClient, SourceCascade, SourceCatalog,
    WikiSource,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXTRACT: &str = "Фотосинтез — образование органических веществ на свету.\n\
{{Шаблон|x}}\n\
== Значение ==\n\
Фотосинтез даёт [[Кислород|кислород]] атмосфере.\n\
[[Файл:Leaf.jpg|thumb|Лист [[растение|растения]]]]\n\
== См. также ==\n\
\n\
== Химия ==\n\
Уравнение реакции.\n\
[[Категория:Биология]]";

async fn mount_empty_search(server: &MockServer, api_path: &str) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .and(query_param("list", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"searchinfo": {"totalhits": 0}, "search": []}
        })))
        .mount(server)
        .await;
}

async fn mount_article(server: &MockServer, api_path: &str, title: &str, extract: &str) {
    let page = json!({
        "pageid": 42,
        "title": title,
        "extract": extract,
        "fullurl": format!("https://ru.wikipedia.org/wiki/{}", title)
    });
    mount_page(server, api_path, title, page).await;
}

async fn mount_page(server: &MockServer, api_path: &str, title: &str, page: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .and(query_param("list", "search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {
                "searchinfo": {"totalhits": 1},
                "search": [{"title": title, "pageid": 42, "snippet": ""}]
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(api_path))
        .and(query_param("titles", title))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": {"pages": {"42": page}}
        })))
        .mount(server)
        .await;
}

fn cascade(server: &MockServer, names: &[&str], search_timeout: Duration) -> SourceCascade {
    let mut languages = BTreeMap::new();
    languages.insert(
        "ru".to_string(),
        names
            .iter()
            .map(|name| WikiSource::new(*name, format!("{}/{}/api.php", server.uri(), name)))
            .collect(),
    );

    let client = MediaWikiClient::new(
        "wiki_material-tests/0.1",
        search_timeout,
        Duration::from_secs(2),
        5,
    )
    .unwrap();
    let config = Config::default_config();

    SourceCascade::new(
        Arc::new(client),
        Arc::new(SourceCatalog::new(languages)),
        config.material.budget_range(),
    )
}

#[tokio::test]
async fn material_falls_back_to_encyclopedia() {
    let server = MockServer::start().await;
    mount_empty_search(&server, "/wikibooks/api.php").await;
    mount_article(&server, "/wikipedia/api.php", "Фотосинтез", EXTRACT).await;

    let outcome = cascade(&server, &["wikibooks", "wikipedia"], Duration::from_secs(2))
        .fetch_material("фотосинтез", "ru", 4000)
        .await
        .unwrap();

    let MaterialOutcome::Found(result) = outcome else {
        panic!("expected material");
    };
    assert_eq!(result.title, "Фотосинтез");
    assert_eq!(result.source_name, "wikipedia");
    assert_eq!(
        result.summary,
        "Фотосинтез — образование органических веществ на свету."
    );
    let titles: Vec<&str> = result.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Значение", "Химия"]);
    assert_eq!(result.sections[0].content, "Фотосинтез даёт кислород атмосфере.");
    assert_eq!(
        result.source_urls,
        vec!["https://ru.wikipedia.org/wiki/Фотосинтез".to_string()]
    );
}

#[tokio::test]
async fn page_without_full_url_gets_curid_link() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/wikipedia/api.php",
        "Atom",
        json!({"pageid": 42, "title": "Atom", "extract": "An atom is a particle."}),
    )
    .await;

    let result = cascade(&server, &["wikipedia"], Duration::from_secs(2))
        .fetch_material("Atom", "ru", 4000)
        .await
        .unwrap()
        .into_result()
        .expect("found");

    assert_eq!(
        result.source_urls,
        vec![format!("{}/wikipedia/?curid=42", server.uri())]
    );
}

#[tokio::test]
async fn slow_source_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/wikibooks/api.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!({"query": {"search": []}})),
        )
        .mount(&server)
        .await;
    mount_article(&server, "/wikipedia/api.php", "Атом", "Атом — частица вещества.").await;

    let result = cascade(&server, &["wikibooks", "wikipedia"], Duration::from_millis(300))
        .fetch_material("атом", "ru", 500)
        .await
        .unwrap()
        .into_result()
        .expect("found");

    assert_eq!(result.source_name, "wikipedia");
    assert_eq!(result.summary, "Атом — частица вещества.");
}

#[tokio::test]
async fn nothing_found_reports_attempted_sources() {
    let server = MockServer::start().await;
    mount_empty_search(&server, "/wikibooks/api.php").await;
    Mock::given(method("GET"))
        .and(path("/wikipedia/api.php"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let outcome = cascade(&server, &["wikibooks", "wikipedia"], Duration::from_secs(2))
        .fetch_material("Qwxzvt", "ru", 4000)
        .await
        .unwrap();

    assert_eq!(
        outcome,
        MaterialOutcome::NotFound {
            topic: "Qwxzvt".to_string(),
            attempted_sources: vec!["wikibooks".to_string(), "wikipedia".to_string()],
        }
    );
}

#[tokio::test]
async fn unsupported_language_never_reaches_the_network() {
    let server = MockServer::start().await;

    let err = cascade(&server, &["wikipedia"], Duration::from_secs(2))
        .fetch_material("Atom", "de", 4000)
        .await
        .unwrap_err();

    assert!(matches!(err, MaterialError::UnsupportedLanguage { .. }));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
