//! Mirror save and view handlers.
//!
//! ```text
//! GET /txt/guardar?nombre=Pan&cantidad=3&precio=2,50
//! GET /json/ver
//! ```

use std::str::FromStr;

use actix_web::web;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, MirrorEntry, MirrorFormat, MirrorReadout, MirrorRecord};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;

/// Unknown format segments read as a missing route.
pub(crate) fn parse_format(raw: &str) -> Result<MirrorFormat, Error> {
    MirrorFormat::from_str(raw).map_err(|err| Error::not_found(err.to_string()))
}

/// Query of a save request; every field is optional and parsed leniently.
#[derive(Debug, Default, Deserialize)]
pub struct SaveQuery {
    pub nombre: Option<String>,
    pub cantidad: Option<String>,
    pub precio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecordBody {
    pub fecha: String,
    pub nombre: String,
    pub cantidad: i64,
    pub precio: String,
}

impl From<&MirrorRecord> for RecordBody {
    fn from(record: &MirrorRecord) -> Self {
        Self {
            fecha: record.timestamp.clone(),
            nombre: record.name.clone(),
            cantidad: record.quantity,
            precio: record.price_2dp(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaveBody {
    pub ok: bool,
    pub format: &'static str,
    pub record: RecordBody,
}

#[derive(Debug, Serialize)]
pub struct ViewBody {
    pub format: &'static str,
    pub records: Vec<RecordBody>,
    pub skipped: usize,
}

impl ViewBody {
    fn new(format: MirrorFormat, readout: &MirrorReadout) -> Self {
        Self {
            format: format.as_str(),
            records: readout.records.iter().map(RecordBody::from).collect(),
            skipped: readout.skipped,
        }
    }
}

/// `GET /{format}/guardar`
pub async fn save_record(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<SaveQuery>,
) -> ApiResult<web::Json<SaveBody>> {
    let format = parse_format(&path)?;
    let query = query.into_inner();
    let entry = MirrorEntry::lenient(
        format,
        query.nombre.as_deref(),
        query.cantidad.as_deref(),
        query.precio.as_deref(),
    );
    let record = state.mirrors.save(format, entry).await?;
    Ok(web::Json(SaveBody {
        ok: true,
        format: format.as_str(),
        record: RecordBody::from(&record),
    }))
}

/// `GET /{format}/ver`
pub async fn view_records(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ViewBody>> {
    let format = parse_format(&path)?;
    let readout = state.mirrors_query.view(format).await?;
    Ok(web::Json(ViewBody::new(format, &readout)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use mockall::predicate::eq;
    use rstest::rstest;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ports::{MockMirrorCommand, MockMirrorQuery};
    use crate::inbound::http::routes::configure;
    use crate::inbound::http::state::HttpStatePorts;
    use crate::inbound::http::test_utils::{
        SIGN_IN_PATH, mock_ports, session_cookie, signed_in_accounts, state_with,
        test_session_middleware, with_sign_in,
    };

    fn ports_with(command: MockMirrorCommand, query: MockMirrorQuery) -> HttpStatePorts {
        let mut ports = mock_ports();
        ports.mirrors = Arc::new(command);
        ports.mirrors_query = Arc::new(query);
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
            let res = test::call_service(
                &app,
                test::TestRequest::get().uri(SIGN_IN_PATH).to_request(),
            )
            .await;
            let cookie = session_cookie(&res);
            (app, cookie)
        }};
    }

    fn stamped(entry: MirrorEntry) -> MirrorRecord {
        entry.into_record("2024-05-01T12:30:00".to_owned())
    }

    #[rstest]
    #[case("/csv/guardar", MirrorFormat::Csv, "Producto CSV", 1, Decimal::ONE)]
    #[case(
        "/txt/guardar?nombre=Pan&cantidad=3&precio=2,5",
        MirrorFormat::Txt,
        "Pan",
        3,
        Decimal::new(25, 1)
    )]
    #[case(
        "/json/guardar?nombre=%20&cantidad=tres&precio=x",
        MirrorFormat::Json,
        "Producto JSON",
        1,
        Decimal::ONE
    )]
    #[actix_web::test]
    async fn save_applies_lenient_defaults(
        #[case] uri: &str,
        #[case] format: MirrorFormat,
        #[case] name: &'static str,
        #[case] quantity: i64,
        #[case] price: Decimal,
    ) {
        let mut command = MockMirrorCommand::new();
        command
            .expect_save()
            .withf(move |f: &MirrorFormat, entry: &MirrorEntry| {
                *f == format
                    && entry.name == name
                    && entry.quantity == quantity
                    && entry.unit_price == price
            })
            .times(1)
            .returning(|_, entry| Ok(stamped(entry)));
        let (app, cookie) = signed_in_app!(ports_with(command, MockMirrorQuery::new()));

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["ok"], true);
        assert_eq!(body["format"], format.as_str());
        assert_eq!(body["record"]["nombre"], name);
        assert_eq!(body["record"]["fecha"], "2024-05-01T12:30:00");
    }

    #[actix_web::test]
    async fn view_reports_records_and_skips() {
        let mut query = MockMirrorQuery::new();
        query
            .expect_view()
            .with(eq(MirrorFormat::Txt))
            .returning(|_| {
                Ok(MirrorReadout {
                    records: vec![stamped(MirrorEntry::lenient(
                        MirrorFormat::Txt,
                        Some("Pan"),
                        Some("3"),
                        Some("2.5"),
                    ))],
                    skipped: 1,
                })
            });
        let (app, cookie) = signed_in_app!(ports_with(MockMirrorCommand::new(), query));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/txt/ver")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({
                "format": "txt",
                "records": [{
                    "fecha": "2024-05-01T12:30:00",
                    "nombre": "Pan",
                    "cantidad": 3,
                    "precio": "2.50",
                }],
                "skipped": 1,
            })
        );
    }

    #[actix_web::test]
    async fn unknown_formats_are_not_found() {
        let (app, cookie) = signed_in_app!(ports_with(
            MockMirrorCommand::new(),
            MockMirrorQuery::new()
        ));
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/xml/ver")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
