//! JSON fixtures and a mock catalog server

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Well-known tag ids
pub const ONESHOT_TAG: &str = "0234a31e-a729-4e28-9d6a-3f87c4966b9e";
pub const MILITARY_TAG: &str = "ac72833b-c4e9-4878-b9db-6c8a4a99444a";
pub const ACTION_TAG: &str = "391b0423-d847-456f-aff0-8b0cfc03066b";

pub fn envelope(data: Vec<Value>, limit: usize, offset: usize, total: usize) -> Value {
    json!({
        "result": "ok",
        "response": "collection",
        "data": data,
        "limit": limit,
        "offset": offset,
        "total": total
    })
}

pub fn manga(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "type": "manga",
        "attributes": {
            "title": {"en": title},
            "altTitles": [{"ja": format!("{title} (ja)")}],
            "description": [],
            "originalLanguage": "ja",
            "lastVolume": "",
            "lastChapter": "",
            "publicationDemographic": "shounen",
            "status": "ongoing",
            "year": 2018,
            "contentRating": "safe",
            "tags": [],
            "availableTranslatedLanguages": ["en", "fr", null],
            "createdAt": "2019-01-01T00:00:00+00:00",
            "updatedAt": "2024-05-01T12:30:00+00:00"
        },
        "relationships": [
            {"id": "author-1", "type": "author"}
        ]
    })
}

pub fn chapter(id: &str, number: Option<&str>, title: Option<&str>) -> Value {
    json!({
        "id": id,
        "type": "chapter",
        "attributes": {
            "volume": "1",
            "chapter": number,
            "title": title,
            "translatedLanguage": "en",
            "externalUrl": null,
            "pages": 3,
            "publishAt": "2020-03-05T10:00:00+00:00",
            "readableAt": "2020-03-05T10:00:00+00:00",
            "version": 1
        },
        "relationships": [
            {"id": "group-1", "type": "scanlation_group"}
        ]
    })
}

pub fn tag(id: &str, name: &str, group: &str) -> Value {
    json!({
        "id": id,
        "type": "tag",
        "attributes": {
            "name": {"en": name},
            "description": {},
            "group": group,
            "version": 1
        },
        "relationships": []
    })
}

pub fn at_home(base_url: &str, hash: &str, files: &[String]) -> Value {
    let saver: Vec<String> = files.iter().map(|f| f.replace(".png", ".jpg")).collect();
    json!({
        "result": "ok",
        "baseUrl": base_url,
        "chapter": {
            "hash": hash,
            "data": files,
            "dataSaver": saver
        }
    })
}

/// Page file names `1-p.png`, `2-p.png`, ...
pub fn page_files(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{i}-p.png")).collect()
}

/// Mount the tag vocabulary
pub async fn mount_tags(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/manga/tag"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(
            vec![
                tag(ACTION_TAG, "Action", "genre"),
                tag(ONESHOT_TAG, "Oneshot", "format"),
                tag(MILITARY_TAG, "Military", "theme"),
            ],
            100,
            0,
            3,
        )))
        .mount(server)
        .await;
}

/// Mount a title search returning `titles` in pages of `limit`
pub async fn mount_search(server: &MockServer, title: &str, titles: &[(&str, &str)], limit: usize) {
    let total = titles.len();
    let records: Vec<Value> = titles.iter().map(|(id, name)| manga(id, name)).collect();
    let mut offset = 0;
    loop {
        let end = (offset + limit).min(total);
        let page = envelope(records[offset..end].to_vec(), limit, offset, total);
        let mock = Mock::given(method("GET"))
            .and(path("/manga"))
            .and(query_param("title", title));
        let mock = if offset == 0 {
            mock.and(query_param_is_missing("offset"))
        } else {
            mock.and(query_param("offset", offset.to_string()))
        };
        mock.respond_with(ResponseTemplate::new(200).set_body_json(page))
            .mount(server)
            .await;

        offset += limit;
        if offset >= total {
            break;
        }
    }
}

/// Mount the chapter feed of `manga_id`
pub async fn mount_feed(server: &MockServer, manga_id: &str, chapters: Vec<Value>) {
    let total = chapters.len();
    Mock::given(method("GET"))
        .and(path(format!("/manga/{manga_id}/feed")))
        .and(query_param("order[chapter]", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(chapters, 500, 0, total)))
        .mount(server)
        .await;
}

/// Mount image-server info for `chapter_id` and serve every page except `missing`
pub async fn mount_chapter_pages(
    server: &MockServer,
    chapter_id: &str,
    files: &[String],
    missing: &[&str],
) {
    let hash = format!("hash-{chapter_id}");
    Mock::given(method("GET"))
        .and(path(format!("/at-home/server/{chapter_id}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(at_home(&server.uri(), &hash, files)),
        )
        .mount(server)
        .await;

    for file in files.iter().filter(|f| !missing.contains(&f.as_str())) {
        Mock::given(method("GET"))
            .and(path(format!("/data/{hash}/{file}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(format!("{chapter_id}:{file}").into_bytes()),
            )
            .mount(server)
            .await;
    }
}
