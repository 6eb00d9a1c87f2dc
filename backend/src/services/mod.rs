use actix_web::web::ServiceConfig;

pub mod data;
pub mod health;
pub mod stats;
pub mod upload;

/// Registers every route of the API. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(upload::configure_routes())
        .service(data::configure_routes())
        .service(stats::configure_routes())
        .service(health::configure_routes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::state::AppState;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::record::DataRecord;
    use common::model::upload::{Separator, UploadSummary};
    use common::responses::{ErrorResponse, StatsResponse};
    use tempfile::TempDir;

    const BOUNDARY: &str = "----dataload-test-boundary";

    fn state_in(dir: &TempDir) -> AppState {
        let db = Database::new(dir.path().join("data.sqlite"));
        db.init_schema().unwrap();
        AppState::new(db, 1024)
    }

    fn multipart(field: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/upload")
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(body)
    }

    #[actix_web::test]
    async fn upload_then_list_stats_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_in(&dir)))
                .configure(configure),
        )
        .await;

        let body = multipart("file", "people.csv", "text/csv", b"id,name\n1,Alice\n,Bob\n3,Carol");
        let summary: UploadSummary =
            test::call_and_read_body_json(&app, upload_request(body).to_request()).await;

        assert_eq!(summary.rows_processed, 3);
        assert_eq!(summary.rows_inserted, 2);
        assert_eq!(summary.rows_failed, 1);
        assert_eq!(summary.filename, "people.csv");
        assert_eq!(summary.separator, Separator::Comma);
        assert_eq!(summary.errors.unwrap()[0].reason, "Invalid or missing id");

        let rows: Vec<DataRecord> =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/data").to_request())
                .await;
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Carol"]);

        let stats: StatsResponse =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/stats").to_request())
                .await;
        assert_eq!(stats.total, 2);

        let resp =
            test::call_service(&app, test::TestRequest::delete().uri("/data").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stats: StatsResponse =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/stats").to_request())
                .await;
        assert_eq!(stats.total, 0);
    }

    #[actix_web::test]
    async fn clearing_an_empty_table_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_in(&dir)))
                .configure(configure),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::delete().uri("/data").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn tab_separated_upload_reports_tab() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_in(&dir)))
                .configure(configure),
        )
        .await;

        let body = multipart(
            "file",
            "people.tsv",
            "text/tab-separated-values",
            b"ID\tNAME\n1\tAlice\n2\tBob",
        );
        let summary: UploadSummary =
            test::call_and_read_body_json(&app, upload_request(body).to_request()).await;

        assert_eq!(summary.separator, Separator::Tab);
        assert_eq!(summary.columns, vec!["ID", "NAME"]);
        assert_eq!(summary.rows_inserted, 2);
    }

    #[actix_web::test]
    async fn header_only_upload_is_rejected_without_inserting() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_in(&dir)))
                .configure(configure),
        )
        .await;

        let body = multipart("file", "empty.csv", "text/csv", b"id,name\n");
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let err: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(err.error, "CSV file is empty or has no valid data");

        let stats: StatsResponse =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/stats").to_request())
                .await;
        assert_eq!(stats.total, 0);
    }

    #[actix_web::test]
    async fn upload_input_is_checked_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_in(&dir)))
                .configure(configure),
        )
        .await;

        let wrong_field = multipart("attachment", "people.csv", "text/csv", b"id\n1");
        let resp = test::call_service(&app, upload_request(wrong_field).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(err.error, "No file uploaded");

        let wrong_type = multipart("file", "photo.png", "image/png", b"id\n1");
        let resp = test::call_service(&app, upload_request(wrong_type).to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let too_big = multipart("file", "big.csv", "text/csv", &vec![b'1'; 2048]);
        let resp = test::call_service(&app, upload_request(too_big).to_request()).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[actix_web::test]
    async fn upload_against_unusable_storage_fails_whole_request() {
        let dir = tempfile::tempdir().unwrap();
        // No schema: the insert statement cannot be prepared.
        let db = Database::new(dir.path().join("no_table.sqlite"));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(db, 1024)))
                .configure(configure),
        )
        .await;

        let body = multipart("file", "people.csv", "text/csv", b"id,name\n1,Alice");
        let resp = test::call_service(&app, upload_request(body).to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(err.error, "Failed to process file");
        assert!(err.details.is_some_and(|d| d.contains("no such table")));
    }

    #[actix_web::test]
    async fn stats_surfaces_storage_failures() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("missing").join("data.sqlite"));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new(db, 1024)))
                .configure(configure),
        )
        .await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/stats").to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(err.error, "Failed to get stats");
        assert!(err.details.is_some_and(|d| !d.is_empty()));
    }

    #[actix_web::test]
    async fn health_is_static() {
        let app = test::init_service(App::new().configure(configure)).await;

        let resp =
            test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
