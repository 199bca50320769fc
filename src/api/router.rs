//! HTTP router.
//!
//! Layers (outermost first): request tracing, permissive CORS, body limit.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::processor::Processor;

/// State shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub processor: Arc<Processor>,
}

/// Build the application router.
///
/// `max_body_bytes` caps each request body, multipart overhead included.
pub fn router(processor: Processor, max_body_bytes: usize) -> Router {
    let state = AppState {
        processor: Arc::new(processor),
    };

    Router::new()
        .route("/", get(handlers::health))
        .route("/identificar-tabelas/", post(handlers::identify_tables))
        .route("/substituir-tabelas/", post(handlers::substitute_tables))
        .route("/validar-excel/", post(handlers::validate_spreadsheet))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::{DOCX_MIME, OUTPUT_FILE_NAME};
    use crate::ooxml::docx::Package;
    use crate::testing::fixtures;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const BOUNDARY: &str = "edital-test-boundary";
    const LIMIT: usize = 1024 * 1024;

    /// A form part: field name, optional file name, content.
    type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

    fn app() -> Router {
        router(Processor::default(), LIMIT)
    }

    fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
        let mut body = Vec::new();
        for (name, file_name, content) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match file_name {
                Some(file_name) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(content);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_bytes(response: Response<Body>) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn items_sheet() -> Vec<u8> {
        fixtures::xlsx(&[
            &["N", "DESCRIÇÃO", "UNIDADE FORNECIMENTO", "QUANTIDADE", "VALOR ESTIMADO"],
            &["1", "Papel A4", "Resma", "10", "100000"],
        ])
    }

    #[tokio::test]
    async fn health_reports_running() {
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Document processing API is running");
    }

    #[tokio::test]
    async fn identify_tables_lists_previews() {
        let doc = fixtures::docx(&[
            fixtures::table(&[&["N", "DESCRIÇÃO"], &["1", "Papel"]]),
            fixtures::table(&[&["Assinatura"]]),
        ]);
        let request = multipart_request(
            "/identificar-tabelas/",
            &[("termo_referencia", Some("termo.docx"), doc.as_slice())],
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!([
                {"id": 0, "title": "Table 1", "preview": "N | DESCRIÇÃO\n1 | Papel", "selected": false},
                {"id": 1, "title": "Table 2", "preview": "Assinatura", "selected": false},
            ])
        );
    }

    #[tokio::test]
    async fn identify_tables_rejects_wrong_extension() {
        let request = multipart_request(
            "/identificar-tabelas/",
            &[("termo_referencia", Some("termo.pdf"), b"%PDF".as_slice())],
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "File must be of type .docx");
    }

    #[tokio::test]
    async fn identify_tables_reports_broken_document_as_500() {
        let request = multipart_request(
            "/identificar-tabelas/",
            &[("termo_referencia", Some("termo.docx"), b"not a zip".as_slice())],
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert!(json["detail"].as_str().unwrap().starts_with("Invalid document format"));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let request = multipart_request("/validar-excel/", &[("outro", None, b"x".as_slice())]);
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn substitute_tables_returns_document() {
        let doc = fixtures::docx(&[
            fixtures::table(&[&["old"]]),
            fixtures::table(&[&["kept"]]),
        ]);
        let sheet = items_sheet();
        let request = multipart_request(
            "/substituir-tabelas/",
            &[
                ("termo_referencia", Some("termo.docx"), doc.as_slice()),
                ("tabela_itens", Some("itens.xlsx"), sheet.as_slice()),
                ("selected_tables", None, b"[0]".as_slice()),
            ],
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], DOCX_MIME);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            format!("attachment; filename={}", OUTPUT_FILE_NAME).as_str()
        );

        let bytes = body_bytes(response).await;
        let package = Package::from_bytes(&bytes).unwrap();
        let tables = package.document().unwrap().tables().unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].cell_texts().unwrap().len(), 3);
        assert_eq!(tables[1].cell_texts().unwrap(), vec![vec!["kept"]]);
    }

    #[tokio::test]
    async fn substitute_tables_checks_each_file_type() {
        let doc = fixtures::docx(&[]);
        let sheet = items_sheet();

        let request = multipart_request(
            "/substituir-tabelas/",
            &[
                ("termo_referencia", Some("termo.odt"), doc.as_slice()),
                ("tabela_itens", Some("itens.xlsx"), sheet.as_slice()),
                ("selected_tables", None, b"[]".as_slice()),
            ],
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["detail"],
            "Terms of reference must be a .docx file"
        );

        let request = multipart_request(
            "/substituir-tabelas/",
            &[
                ("termo_referencia", Some("termo.docx"), doc.as_slice()),
                ("tabela_itens", Some("itens.csv"), sheet.as_slice()),
                ("selected_tables", None, b"[]".as_slice()),
            ],
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "Items table must be a .xlsx file");
    }

    #[tokio::test]
    async fn substitute_tables_rejects_malformed_selection() {
        let doc = fixtures::docx(&[]);
        let sheet = items_sheet();
        let request = multipart_request(
            "/substituir-tabelas/",
            &[
                ("termo_referencia", Some("termo.docx"), doc.as_slice()),
                ("tabela_itens", Some("itens.xlsx"), sheet.as_slice()),
                ("selected_tables", None, b"{\"a\": 1}".as_slice()),
            ],
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn substitute_tables_reports_missing_columns() {
        let doc = fixtures::docx(&[fixtures::table(&[&["x"]])]);
        let sheet = fixtures::xlsx(&[&["N", "DESCRIÇÃO", "QUANTIDADE"]]);
        let request = multipart_request(
            "/substituir-tabelas/",
            &[
                ("termo_referencia", Some("termo.docx"), doc.as_slice()),
                ("tabela_itens", Some("itens.xlsx"), sheet.as_slice()),
                ("selected_tables", None, b"[0]".as_slice()),
            ],
        );
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["detail"],
            "Missing required columns: UNIDADE FORNECIMENTO, VALOR ESTIMADO"
        );
    }

    #[tokio::test]
    async fn validate_spreadsheet_responses() {
        let sheet = items_sheet();
        let request = multipart_request("/validar-excel/", &[("tabela_itens", Some("itens.xlsx"), sheet.as_slice())]);
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"message": "File is valid", "valid": true})
        );

        let request = multipart_request("/validar-excel/", &[("tabela_itens", Some("itens.xls"), sheet.as_slice())]);
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["detail"], "File must be of type .xlsx");

        let request = multipart_request("/validar-excel/", &[("tabela_itens", Some("itens.xlsx"), b"junk".as_slice())]);
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["detail"],
            crate::processor::UNREADABLE_SPREADSHEET
        );
    }
}
