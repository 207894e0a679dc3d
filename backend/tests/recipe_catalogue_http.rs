//! End-to-end behaviour of the recipe catalogue over HTTP, backed by the
//! in-memory store.

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use cookbook::Trace;
use cookbook::domain::TRACE_ID_HEADER;
use cookbook::inbound::http::recipes::configure;
use cookbook::inbound::http::state::HttpState;
use cookbook::test_support::in_memory_catalog;

async fn catalogue_app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(HttpState::new(in_memory_catalog())))
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

async fn call(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: test::TestRequest,
) -> (StatusCode, Value) {
    let response = test::call_service(app, request.to_request()).await;
    assert!(
        response.headers().contains_key(TRACE_ID_HEADER),
        "every response carries a trace id"
    );
    let status = response.status();
    (status, test::read_body_json(response).await)
}

fn create(body: &Value) -> test::TestRequest {
    test::TestRequest::post().uri("/recipes").set_json(body)
}

fn get(id: &Value) -> test::TestRequest {
    test::TestRequest::get().uri(&format!("/recipes/{id}"))
}

fn delete(id: &Value) -> test::TestRequest {
    test::TestRequest::delete().uri(&format!("/recipes/{id}"))
}

#[fixture]
fn recipe() -> Value {
    json!({
        "name": "Хачапури",
        "cooking_time": 45,
        "views_amount": 3,
        "description": "Тесто, сыр, яйцо",
        "cuisine": "Грузинская",
        "created_at": "2024-10-25T13:08:06.730568",
        "ingredients": [
            {"name": "сулугуни", "quantity": "300 г"},
            {"name": "яйцо", "quantity": "1 шт"}
        ]
    })
}

#[rstest]
#[actix_web::test]
async fn created_recipe_is_fetched_with_one_more_view(recipe: Value) {
    let app = catalogue_app().await;

    let (status, created) = call(&app, create(&recipe)).await;
    assert_eq!(status, StatusCode::OK);
    let id = created["id"].clone();

    let (status, fetched) = call(&app, get(&id)).await;
    assert_eq!(status, StatusCode::OK);

    let mut expected = created;
    expected["views_amount"] = json!(4);
    assert_eq!(fetched, expected);
}

#[rstest]
#[actix_web::test]
async fn each_fetch_counts_once(recipe: Value) {
    let app = catalogue_app().await;
    let (_, created) = call(&app, create(&recipe)).await;
    let id = created["id"].clone();

    for expected in 4..=6 {
        let (_, fetched) = call(&app, get(&id)).await;
        assert_eq!(fetched["views_amount"], json!(expected));
    }

    let (_, listed) = call(&app, test::TestRequest::get().uri("/recipes")).await;
    assert_eq!(listed[0]["views_amount"], json!(6));
}

#[rstest]
#[actix_web::test]
async fn listing_returns_one_preview_per_recipe(recipe: Value) {
    let app = catalogue_app().await;
    let names = ["Первый", "Второй", "Третий"];
    for name in names {
        let mut body = recipe.clone();
        body["name"] = json!(name);
        let (status, _) = call(&app, create(&body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, listed) = call(&app, test::TestRequest::get().uri("/recipes")).await;

    assert_eq!(status, StatusCode::OK);
    let previews = listed.as_array().expect("list is an array");
    assert_eq!(previews.len(), names.len());
    for (preview, name) in previews.iter().zip(names) {
        assert_eq!(
            preview,
            &json!({"name": name, "cooking_time": 45, "views_amount": 3})
        );
    }
}

#[rstest]
#[case("name")]
#[case("cooking_time")]
#[case("description")]
#[actix_web::test]
async fn omitted_required_field_is_reported(recipe: Value, #[case] field: &str) {
    let app = catalogue_app().await;
    let mut body = recipe;
    if let Some(object) = body.as_object_mut() {
        object.remove(field);
    }

    let (status, error) = call(&app, create(&body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["detail"][0]["type"], json!("missing"));
    assert_eq!(error["detail"][0]["loc"], json!(["body", field]));
}

#[rstest]
#[actix_web::test]
async fn unknown_cuisine_lists_the_ten_allowed_values(recipe: Value) {
    let app = catalogue_app().await;
    let mut body = recipe;
    body["cuisine"] = json!("Марсианская");

    let (status, error) = call(&app, create(&body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let expected = error["detail"][0]["ctx"]["expected"]
        .as_str()
        .expect("expected values are a string");
    for cuisine in [
        "Русская",
        "Китайская",
        "Японская",
        "Индийская",
        "Итальянская",
        "Французская",
        "Грузинская",
        "Паназиатская",
        "Мексиканская",
        "Интернациональная",
    ] {
        assert!(expected.contains(&format!("'{cuisine}'")), "{cuisine} missing");
    }
    assert_eq!(expected.matches('\'').count(), 20);
}

#[rstest]
#[actix_web::test]
async fn rejected_create_stores_nothing(recipe: Value) {
    let app = catalogue_app().await;
    let mut body = recipe;
    body["ingredients"][1]["quantity"] = json!("");

    let (status, _) = call(&app, create(&body)).await;
    let (_, listed) = call(&app, test::TestRequest::get().uri("/recipes")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(listed, json!([]));
}

#[rstest]
#[actix_web::test]
async fn deleted_recipe_is_gone(recipe: Value) {
    let app = catalogue_app().await;
    let (_, created) = call(&app, create(&recipe)).await;
    let id = created["id"].clone();

    let (status, body) = call(&app, delete(&id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Recipe deleted"}));

    let (status, body) = call(&app, get(&id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Recipe not found"}));

    let (_, listed) = call(&app, test::TestRequest::get().uri("/recipes")).await;
    assert_eq!(listed, json!([]));
}

#[rstest]
#[actix_web::test]
async fn ids_are_not_reused_after_delete(recipe: Value) {
    let app = catalogue_app().await;
    let (_, first) = call(&app, create(&recipe)).await;
    call(&app, delete(&first["id"])).await;

    let (_, second) = call(&app, create(&recipe)).await;

    assert_ne!(first["id"], second["id"]);
}

#[rstest]
#[case(json!(404))]
#[case(json!(0))]
#[case(json!(-1))]
#[case(json!(9_999_999_999_i64))]
#[case(json!(u64::MAX))]
#[case(json!(i64::MIN))]
#[actix_web::test]
async fn unknown_ids_are_not_found(#[case] id: Value) {
    let app = catalogue_app().await;

    let (get_status, get_body) = call(&app, get(&id)).await;
    let (delete_status, delete_body) = call(&app, delete(&id)).await;

    assert_eq!(get_status, StatusCode::NOT_FOUND);
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
    assert_eq!(get_body, json!({"detail": "Recipe not found"}));
    assert_eq!(delete_body, get_body);
}
