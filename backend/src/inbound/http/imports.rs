//! Mirror import handlers.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::domain::ports::{ImportAllReport, ImportReport};
use crate::inbound::http::ApiResult;
use crate::inbound::http::mirrors::parse_format;
use crate::inbound::http::session::CurrentUser;
use crate::inbound::http::state::HttpState;

/// Path segment selecting every format in order.
const ALL_TARGET: &str = "all";

#[derive(Debug, Serialize)]
pub struct ImportBody {
    pub format: &'static str,
    pub processed: usize,
}

impl From<ImportReport> for ImportBody {
    fn from(report: ImportReport) -> Self {
        Self {
            format: report.format.as_str(),
            processed: report.processed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportAllBody {
    pub processed: usize,
    pub txt: usize,
    pub json: usize,
    pub csv: usize,
}

impl From<ImportAllReport> for ImportAllBody {
    fn from(report: ImportAllReport) -> Self {
        Self {
            processed: report.processed(),
            txt: report.txt,
            json: report.json,
            csv: report.csv,
        }
    }
}

/// `GET /import/{target}` where target is `txt`, `json`, `csv` or `all`.
pub async fn run_import(
    _user: CurrentUser,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let target = path.into_inner();
    if target.trim().eq_ignore_ascii_case(ALL_TARGET) {
        let report = state.imports.import_all().await;
        return Ok(HttpResponse::Ok().json(ImportAllBody::from(report)));
    }
    let format = parse_format(&target)?;
    let report = state.imports.import(format).await?;
    Ok(HttpResponse::Ok().json(ImportBody::from(report)))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{Error, MirrorFormat};
    use crate::domain::ports::MockImportCommand;
    use crate::inbound::http::routes::configure;
    use crate::inbound::http::test_utils::{
        SIGN_IN_PATH, mock_ports, session_cookie, signed_in_accounts, state_with,
        test_session_middleware, with_sign_in,
    };

    async fn call(imports: MockImportCommand, uri: &str) -> (StatusCode, Value) {
        let mut ports = mock_ports();
        ports.imports = Arc::new(imports);
        ports.accounts = Arc::new(signed_in_accounts());
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(state_with(ports)))
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
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(uri).cookie(cookie).to_request(),
        )
        .await;
        let status = res.status();
        let body = test::read_body_json(res).await;
        (status, body)
    }

    #[rstest]
    #[case("/import/txt", MirrorFormat::Txt)]
    #[case("/import/json", MirrorFormat::Json)]
    #[case("/import/CSV", MirrorFormat::Csv)]
    #[actix_web::test]
    async fn single_format_reports_processed(#[case] uri: &str, #[case] format: MirrorFormat) {
        let mut imports = MockImportCommand::new();
        imports
            .expect_import()
            .with(eq(format))
            .times(1)
            .returning(|format| {
                Ok(ImportReport {
                    format,
                    processed: 3,
                })
            });
        let (status, body) = call(imports, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "format": format.as_str(), "processed": 3 }));
    }

    #[actix_web::test]
    async fn all_reports_each_format_and_the_sum() {
        let mut imports = MockImportCommand::new();
        imports.expect_import_all().times(1).returning(|| ImportAllReport {
            txt: 3,
            json: 0,
            csv: 2,
        });
        let (status, body) = call(imports, "/import/all").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "processed": 5, "txt": 3, "json": 0, "csv": 2 })
        );
    }

    #[actix_web::test]
    async fn store_failures_surface() {
        let mut imports = MockImportCommand::new();
        imports
            .expect_import()
            .returning(|_| Err(Error::service_unavailable("store down")));
        let (status, body) = call(imports, "/import/txt").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], "service_unavailable");
    }

    #[actix_web::test]
    async fn unknown_targets_are_not_found() {
        let (status, _) = call(MockImportCommand::new(), "/import/xml").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
