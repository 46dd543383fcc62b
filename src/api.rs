//! API server for email-finder.

use crate::error::{AppError, Result};
use crate::i18n::{language_from_accept_header, messages, translate};
use crate::models::{BatchOutcome, PatternReport, PersonInput, PersonPatterns};
use crate::patterns::{generate_email_patterns, generate_for_all};
use crate::processor::{admit_person, process_batch};
use crate::store::{PeopleStore, PersonId, StoredPerson};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use warp::{
    Filter, Rejection, Reply,
    http::StatusCode,
    reply::{Json, WithStatus},
};

/// Store shared by every request of the server.
pub(crate) type SharedStore = Arc<Mutex<PeopleStore>>;

/// Request bodies larger than this are rejected.
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// API response structure
#[derive(Serialize, Deserialize)]
struct ApiResponse<T> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
}

/// Batch API request structure
#[derive(Deserialize)]
struct BatchRequest {
    people: Vec<PersonInput>,
}

type ApiReply = WithStatus<Json>;

fn success<T: Serialize>(message: impl Into<String>, result: T, status: StatusCode) -> ApiReply {
    warp::reply::with_status(
        warp::reply::json(&ApiResponse {
            success: true,
            message: message.into(),
            result: Some(result),
        }),
        status,
    )
}

fn status_only(success: bool, message: impl Into<String>, status: StatusCode) -> ApiReply {
    warp::reply::with_status(
        warp::reply::json(&ApiResponse::<()> {
            success,
            message: message.into(),
            result: None,
        }),
        status,
    )
}

fn failure(message: impl Into<String>, status: StatusCode) -> ApiReply {
    status_only(false, message, status)
}

/// Maps an error to a reply, translating user-facing messages into `lang`.
fn error_reply(err: &AppError, lang: &str) -> ApiReply {
    let status = match err {
        AppError::PersonNotFound(_) => StatusCode::NOT_FOUND,
        e if e.message_key().is_some() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let message = match err.message_key() {
        Some(key) => translate(lang, key).to_string(),
        None => "Server error".to_string(),
    };
    tracing::warn!("Request failed ({}): {}", status, err);
    failure(message, status)
}

/// Resolves the language of a request from `Accept-Language`, else `default`.
fn with_language(
    default: String,
) -> impl Filter<Extract = (String,), Error = Rejection> + Clone {
    warp::header::optional::<String>("accept-language").map(move |header: Option<String>| {
        header
            .as_deref()
            .and_then(language_from_accept_header)
            .map(str::to_string)
            .unwrap_or_else(|| default.clone())
    })
}

fn json_body<T: serde::de::DeserializeOwned + Send>()
-> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

/// Builds every route of the API.
pub(crate) fn routes(
    store: SharedStore,
    default_language: String,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());
    let lang = with_language(default_language);

    // Health check endpoint
    let health = warp::path!("health")
        .and(warp::get())
        .map(|| status_only(true, "Email Finder API is running", StatusCode::OK));

    // Single person generation endpoint
    let patterns = warp::path!("patterns")
        .and(warp::post())
        .and(json_body())
        .and(lang.clone())
        .and_then(handle_patterns);

    // Batch generation endpoint
    let batch = warp::path!("batch")
        .and(warp::post())
        .and(json_body())
        .and_then(handle_batch);

    let list_people = warp::path!("people")
        .and(warp::get())
        .and(store_filter.clone())
        .and(lang.clone())
        .and_then(handle_list_people);

    let add_person = warp::path!("people")
        .and(warp::post())
        .and(json_body())
        .and(store_filter.clone())
        .and(lang.clone())
        .and_then(handle_add_person);

    let remove_person = warp::path!("people" / PersonId)
        .and(warp::delete())
        .and(store_filter.clone())
        .and(lang.clone())
        .and_then(handle_remove_person);

    let people_patterns = warp::path!("people" / "patterns")
        .and(warp::get())
        .and(store_filter)
        .and(lang)
        .and_then(handle_people_patterns);

    let translations = warp::path!("i18n" / String)
        .and(warp::get())
        .map(|lang: String| success("Translations", messages(&lang), StatusCode::OK));

    health
        .or(patterns)
        .or(batch)
        .or(people_patterns)
        .or(list_people)
        .or(add_person)
        .or(remove_person)
        .or(translations)
        .recover(handle_rejection)
        .with(warp::cors().allow_any_origin())
}

/// Start the API server
pub(crate) async fn start_api_server(port: u16, default_language: String) -> Result<()> {
    let store: SharedStore = Arc::new(Mutex::new(PeopleStore::new()));
    tracing::info!("Starting API server on port {}", port);
    warp::serve(routes(store, default_language))
        .run(([0, 0, 0, 0], port))
        .await;
    Ok(())
}

/// Generates the candidates of a single person.
async fn handle_patterns(
    input: PersonInput,
    lang: String,
) -> std::result::Result<ApiReply, Rejection> {
    let reply = match admit_person(&input) {
        Ok(person) => {
            let patterns = generate_email_patterns(&person);
            tracing::info!("Generated {} patterns for {}", patterns.len(), person.display_name());
            success(
                format!("Generated {} patterns", patterns.len()),
                PersonPatterns { person, patterns },
                StatusCode::OK,
            )
        }
        Err(e) => error_reply(&e, &lang),
    };
    Ok(reply)
}

/// Handle a batch generation request
async fn handle_batch(batch: BatchRequest) -> std::result::Result<ApiReply, Rejection> {
    tracing::info!("Processing batch of {} people", batch.people.len());
    let outcome: BatchOutcome = process_batch(&batch.people);
    Ok(success(
        format!(
            "Processed {} people ({} skipped)",
            outcome.report.per_person.len(),
            outcome.skipped.len()
        ),
        outcome,
        StatusCode::OK,
    ))
}

async fn handle_list_people(
    store: SharedStore,
    lang: String,
) -> std::result::Result<ApiReply, Rejection> {
    let store = store.lock().await;
    let message = if store.is_empty() {
        translate(&lang, "noPersonsAdded").to_string()
    } else {
        format!("{} people", store.len())
    };
    let entries: Vec<StoredPerson> = store.entries().to_vec();
    Ok(success(message, entries, StatusCode::OK))
}

async fn handle_add_person(
    input: PersonInput,
    store: SharedStore,
    lang: String,
) -> std::result::Result<ApiReply, Rejection> {
    let person = match admit_person(&input) {
        Ok(person) => person,
        Err(e) => return Ok(error_reply(&e, &lang)),
    };
    let mut store = store.lock().await;
    let id = store.add(person.clone());
    tracing::info!("Added person #{} ({} in store)", id, store.len());
    Ok(success(
        format!("Added {}", person.display_name()),
        StoredPerson { id, person },
        StatusCode::CREATED,
    ))
}

async fn handle_remove_person(
    id: PersonId,
    store: SharedStore,
    lang: String,
) -> std::result::Result<ApiReply, Rejection> {
    let removed = store.lock().await.remove(id);
    Ok(match removed {
        Some(person) => success(format!("Removed {}", person.display_name()), person, StatusCode::OK),
        None => error_reply(&AppError::PersonNotFound(id), &lang),
    })
}

/// Candidates of everyone currently in the store.
async fn handle_people_patterns(
    store: SharedStore,
    lang: String,
) -> std::result::Result<ApiReply, Rejection> {
    let people = store.lock().await.list();
    let report: PatternReport = generate_for_all(&people);
    let message = if people.is_empty() {
        translate(&lang, "noResults").to_string()
    } else {
        format!("Generated {} patterns", report.flattened.len())
    };
    Ok(success(message, report, StatusCode::OK))
}

/// Handle API rejections
async fn handle_rejection(err: Rejection) -> std::result::Result<ApiReply, Rejection> {
    if err.is_not_found() {
        Ok(failure("Not Found", StatusCode::NOT_FOUND))
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        Ok(failure(format!("Invalid body: {}", e), StatusCode::BAD_REQUEST))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        Ok(failure("Payload too large", StatusCode::PAYLOAD_TOO_LARGE))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        Ok(failure("Method not allowed", StatusCode::METHOD_NOT_ALLOWED))
    } else {
        Ok(failure("Bad request", StatusCode::BAD_REQUEST))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn api() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        routes(Arc::new(Mutex::new(PeopleStore::new())), "en".to_string())
    }

    fn body<B: AsRef<[u8]>>(res: &warp::http::Response<B>) -> Value {
        serde_json::from_slice(res.body().as_ref()).expect("JSON body")
    }

    #[tokio::test]
    async fn test_health() {
        let res = warp::test::request().path("/health").reply(&api()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body(&res)["success"], true);
    }

    #[tokio::test]
    async fn test_patterns_endpoint_returns_ordered_candidates() {
        let res = warp::test::request()
            .method("POST")
            .path("/patterns")
            .json(&json!({"firstName": "Marie", "lastName": "Curie", "domain": "@Sorbonne.fr"}))
            .reply(&api())
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let patterns = &body(&res)["result"]["patterns"];
        assert_eq!(patterns.as_array().map(Vec::len), Some(9));
        assert_eq!(patterns[0], "marie.curie@sorbonne.fr");
        assert_eq!(patterns[8], "mc@sorbonne.fr");
    }

    #[tokio::test]
    async fn test_patterns_endpoint_translates_validation_errors() {
        let res = warp::test::request()
            .method("POST")
            .path("/patterns")
            .header("accept-language", "es-ES,es;q=0.9")
            .json(&json!({"firstName": "Marie", "lastName": "Curie", "domain": "no-tld"}))
            .reply(&api())
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body(&res);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "El dominio ingresado no es válido (ej: empresa.com).");
    }

    #[tokio::test]
    async fn test_patterns_endpoint_uses_default_language() {
        let res = warp::test::request()
            .method("POST")
            .path("/patterns")
            .json(&json!({"firstName": "Marie", "domain": "sorbonne.fr"}))
            .reply(&api())
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body(&res)["message"], "Please fill in all fields.");
    }

    #[tokio::test]
    async fn test_batch_endpoint_reports_skipped_records() {
        let res = warp::test::request()
            .method("POST")
            .path("/batch")
            .json(&json!({"people": [
                {"firstName": "Marie", "lastName": "Curie", "domain": "sorbonne.fr"},
                {"firstName": "", "lastName": "", "domain": "sorbonne.fr"},
                {"fullName": "Pierre Curie", "domain": "sorbonne.fr"}
            ]}))
            .reply(&api())
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let result = &body(&res)["result"];
        assert_eq!(result["report"]["flattened"].as_array().map(Vec::len), Some(18));
        assert_eq!(result["skipped"][0]["index"], 1);
    }

    #[tokio::test]
    async fn test_people_store_lifecycle() {
        let api = api();

        let res = warp::test::request()
            .method("POST")
            .path("/people")
            .json(&json!({"firstName": "Marie", "lastName": "Curie", "domain": "sorbonne.fr"}))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let id = body(&res)["result"]["id"].as_u64().expect("id");

        warp::test::request()
            .method("POST")
            .path("/people")
            .json(&json!({"firstName": "Pierre", "lastName": "Curie", "domain": "sorbonne.fr"}))
            .reply(&api)
            .await;

        let res = warp::test::request().path("/people").reply(&api).await;
        assert_eq!(body(&res)["result"].as_array().map(Vec::len), Some(2));

        let res = warp::test::request().path("/people/patterns").reply(&api).await;
        let flattened = body(&res)["result"]["flattened"].clone();
        assert_eq!(flattened.as_array().map(Vec::len), Some(18));
        assert_eq!(flattened[0], "marie.curie@sorbonne.fr");

        let res = warp::test::request()
            .method("DELETE")
            .path(&format!("/people/{}", id))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = warp::test::request()
            .method("DELETE")
            .path(&format!("/people/{}", id))
            .reply(&api)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body(&res)["message"], "Person not found.");

        let res = warp::test::request().path("/people/patterns").reply(&api).await;
        assert_eq!(body(&res)["result"]["flattened"][0], "pierre.curie@sorbonne.fr");
    }

    #[tokio::test]
    async fn test_empty_store_messages_are_translated() {
        let api = api();
        let res = warp::test::request()
            .path("/people")
            .header("accept-language", "fr-FR")
            .reply(&api)
            .await;
        assert_eq!(
            body(&res)["message"],
            "Aucune personne ajoutée. Utilisez le formulaire ci-dessus pour ajouter des personnes."
        );

        let res = warp::test::request().path("/people/patterns").reply(&api).await;
        assert_eq!(body(&res)["message"], "Add people to generate email suggestions.");
        assert_eq!(body(&res)["result"]["flattened"].as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_translations_endpoint() {
        let res = warp::test::request().path("/i18n/en-US").reply(&api()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body(&res)["result"]["copied"], "Copied!");
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_bad_request() {
        let res = warp::test::request()
            .method("POST")
            .path("/patterns")
            .header("content-type", "application/json")
            .body("{not json")
            .reply(&api())
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let res = warp::test::request().path("/nope").reply(&api()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
