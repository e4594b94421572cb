//! Handler tests for product routes over mocked ports.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockall::predicate::eq;
use rstest::rstest;
use rust_decimal::Decimal;
use serde_json::Value;

use super::*;
use crate::domain::ports::{MockProductCommand, MockProductQuery};
use crate::domain::{Error, ProductDraft, ProductName, Quantity, UnitPrice};
use crate::inbound::http::routes::configure;
use crate::inbound::http::state::HttpStatePorts;
use crate::inbound::http::test_utils::{
    SIGN_IN_PATH, mock_ports, session_cookie, signed_in_accounts, state_with,
    test_session_middleware, with_sign_in,
};

fn product(id: i64, name: &str, quantity: i64, cents: i64) -> Product {
    Product::new(
        ProductId::new(id),
        ProductDraft::new(
            ProductName::new(name).expect("name"),
            Quantity::new(quantity).expect("quantity"),
            UnitPrice::from_cents(cents).expect("price"),
        ),
    )
}

fn ports_with(command: MockProductCommand, query: MockProductQuery) -> HttpStatePorts {
    let mut ports = mock_ports();
    ports.products = Arc::new(command);
    ports.products_query = Arc::new(query);
    ports.accounts = Arc::new(signed_in_accounts());
    ports
}

macro_rules! signed_in_app {
    ($ports:expr) => {{
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state_with($ports)))
                .configure(with_sign_in)
                .configure(configure),
        )
        .await;
        let res =
            test::call_service(&app, test::TestRequest::get().uri(SIGN_IN_PATH).to_request())
                .await;
        let cookie = session_cookie(&res);
        (app, cookie)
    }};
}

#[actix_web::test]
async fn listing_reports_totals() {
    let mut query = MockProductQuery::new();
    query.expect_summary().times(1).returning(|| {
        Ok(InventorySummary::from_products(vec![
            product(1, "Pan", 3, 250),
            product(2, "Leche", 2, 340),
        ])
        .expect("totals"))
    });
    let (app, cookie) = signed_in_app!(ports_with(MockProductCommand::new(), query));

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["totalItems"], 5);
    assert_eq!(body["totalValue"], "14.30");
    assert_eq!(body["products"][0]["unitPrice"], "2.50");
    assert_eq!(body["products"][1]["stockValue"], "6.80");
}

#[actix_web::test]
async fn anonymous_listing_is_rejected() {
    let app = test::init_service(
        App::new()
            .wrap(test_session_middleware())
            .app_data(web::Data::new(state_with(mock_ports())))
            .configure(configure),
    )
    .await;
    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("/nuevo")]
#[case("/mysql/productos/crear")]
#[actix_web::test]
async fn create_stores_validated_draft(#[case] uri: &str) {
    let mut command = MockProductCommand::new();
    command
        .expect_create()
        .withf(|draft: &ProductDraft| {
            draft.name.as_ref() == "Pan"
                && draft.quantity.get() == 3
                && draft.unit_price.amount() == Decimal::new(250, 2)
        })
        .times(1)
        .returning(|draft| Ok(Product::new(ProductId::new(1), draft)));
    let (app, cookie) = signed_in_app!(ports_with(command, MockProductQuery::new()));

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(uri)
            .cookie(cookie)
            .set_form([("nombre", " Pan "), ("cantidad", "3"), ("precio", "2,5")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Pan");
}

#[actix_web::test]
async fn invalid_form_never_reaches_the_store() {
    let (app, cookie) = signed_in_app!(ports_with(
        MockProductCommand::new(),
        MockProductQuery::new()
    ));

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/nuevo")
            .cookie(cookie)
            .set_form([("nombre", "Pan"), ("cantidad", "-2"), ("precio", "1")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "cantidad");
    assert_eq!(body["details"]["code"], "negative");
}

#[actix_web::test]
async fn new_form_is_blank() {
    let (app, cookie) = signed_in_app!(ports_with(
        MockProductCommand::new(),
        MockProductQuery::new()
    ));
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/nuevo").cookie(cookie).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        serde_json::json!({ "nombre": "", "cantidad": "", "precio": "" })
    );
}

#[actix_web::test]
async fn edit_form_is_prefilled() {
    let mut query = MockProductQuery::new();
    query
        .expect_get()
        .with(eq(ProductId::new(4)))
        .returning(|id| Ok(product(id.get(), "Azucar", 5, 420)));
    let (app, cookie) = signed_in_app!(ports_with(MockProductCommand::new(), query));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/editar/4")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        serde_json::json!({ "id": 4, "nombre": "Azucar", "cantidad": "5", "precio": "4.20" })
    );
}

#[actix_web::test]
async fn editing_a_missing_product_is_not_found() {
    let mut command = MockProductCommand::new();
    command
        .expect_update()
        .returning(|id, _| Err(Error::not_found(format!("product {} not found", id.get()))));
    let (app, cookie) = signed_in_app!(ports_with(command, MockProductQuery::new()));

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/editar/99")
            .cookie(cookie)
            .set_form([("nombre", "Pan"), ("cantidad", "1"), ("precio", "1")])
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/eliminar/3")]
#[case("/mysql/productos/eliminar/3")]
#[actix_web::test]
async fn delete_returns_no_content(#[case] uri: &str) {
    let mut command = MockProductCommand::new();
    command
        .expect_delete()
        .with(eq(ProductId::new(3)))
        .times(1)
        .returning(|_| Ok(()));
    let (app, cookie) = signed_in_app!(ports_with(command, MockProductQuery::new()));

    let res = test::call_service(
        &app,
        test::TestRequest::post().uri(uri).cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[rstest]
#[case("/buscar?q=pan", "pan")]
#[case("/buscar", "")]
#[actix_web::test]
async fn search_forwards_the_query(#[case] uri: &str, #[case] expected: &'static str) {
    let mut query = MockProductQuery::new();
    query
        .expect_search()
        .withf(move |q: &str| q == expected)
        .times(1)
        .returning(|_| Ok(InventorySummary::from_products(Vec::new()).expect("totals")));
    let (app, cookie) = signed_in_app!(ports_with(MockProductCommand::new(), query));

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["totalItems"], 0);
}
