#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ApiResponse, ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use axum_test::multipart::{MultipartForm, Part};
    use common::PlanAnalysis;
    use std::sync::atomic::Ordering;

    /// Benefit illustration for a plan paying 100 a year for 3 years.
    const EVERGREEN_DOC: &str = r#"{
        "product_name": "Evergreen Life",
        "annual_premium": 100.0,
        "payment_years": 3,
        "benefit_table": [
            {"year": 1, "cash_value": 50.0},
            {"year": 2, "cash_value": 120.0},
            {"year": 3, "cash_value": 240.0},
            {"year": 4, "cash_value": 380.0},
            {"year": 5, "cash_value": 520.0}
        ]
    }"#;

    /// Short plan paying 200 a year for 2 years, breaking even in year 2.
    const HORIZON_DOC: &str = r#"{
        "product_name": "Horizon Saver",
        "annual_premium": 200.0,
        "payment_years": 2,
        "benefit_table": [
            {"year": 1, "cash_value": 150.0},
            {"year": 2, "cash_value": 420.0}
        ]
    }"#;

    fn upload(file_name: &str, content: &str) -> Part {
        Part::bytes(content.as_bytes().to_vec())
            .file_name(file_name)
            .mime_type("text/plain")
    }

    #[tokio::test]
    async fn test_health_check() {
        // Setup test server
        let (app, _analyst) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Send GET request to health endpoint
        let response = server.get("/health").await;

        // Verify response
        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(body.llm, "key missing");
    }

    #[tokio::test]
    async fn test_analyze_two_documents() {
        // Setup test server
        let (app, _analyst) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Upload both documents in one request
        let form = MultipartForm::new()
            .add_part("files", upload("evergreen.txt", EVERGREEN_DOC))
            .add_part("files", upload("horizon.txt", HORIZON_DOC));

        let response = server.post("/api/analyze").multipart(form).await;

        // Verify response
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<PlanAnalysis>> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "Documents analyzed successfully");
        assert_eq!(body.data.len(), 2);

        // Results come back in upload order
        let evergreen = &body.data[0];
        assert_eq!(evergreen.product_name, "Evergreen Life");
        assert_eq!(evergreen.annual_premium, Some(100.0));
        assert_eq!(evergreen.cashflows, vec![-50.0, -80.0, -60.0, 80.0, 220.0]);
        assert_eq!(evergreen.payback_year, Some(4));

        // IRR is undefined before the payback year and positive afterwards
        assert_eq!(evergreen.irr_trend[..3], [None, None, None]);
        let year4 = evergreen.irr_trend[3].expect("IRR at payback year");
        assert!(year4 > 12.0 && year4 < 12.6, "unexpected year-4 IRR {}", year4);
        assert!(evergreen.irr_trend[4].is_some());
        assert!(evergreen.summary.starts_with("Summary for Evergreen Life"));

        let horizon = &body.data[1];
        assert_eq!(horizon.product_name, "Horizon Saver");
        assert_eq!(horizon.cashflows, vec![-50.0, 20.0]);
        assert_eq!(horizon.payback_year, Some(2));
        assert_eq!(horizon.irr_trend, vec![None, Some(10.0)]);
        assert!(horizon.summary.starts_with("Summary for Horizon Saver"));
    }

    #[tokio::test]
    async fn test_analyze_empty_request() {
        // Setup test server
        let (app, _analyst) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Send a multipart request without any file fields
        let form = MultipartForm::new().add_text("note", "ignore me");
        let response = server.post("/api/analyze").multipart(form).await;

        // Verify response
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "NO_FILES");
        assert_eq!(body.error, "No files uploaded");
    }

    #[tokio::test]
    async fn test_analyze_unreadable_document() {
        // Setup test server
        let (app, _analyst) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // The stub analyst cannot parse prose, so the batch fails
        let form = MultipartForm::new()
            .add_part("files", upload("broken.txt", "quarterly report, no plan terms here"));
        let response = server.post("/api/analyze").multipart(form).await;

        // Verify response
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "ANALYSIS_FAILED");
        assert!(body.error.contains("broken.txt"));
    }

    #[tokio::test]
    async fn test_analyze_uses_cache_for_repeat_upload() {
        // Setup test server
        let (app, analyst) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Upload the same document twice
        for _ in 0..2 {
            let form = MultipartForm::new()
                .add_part("files", upload("evergreen.txt", EVERGREEN_DOC));
            let response = server.post("/api/analyze").multipart(form).await;

            response.assert_status(StatusCode::OK);
            let body: ApiResponse<Vec<PlanAnalysis>> = response.json();
            assert_eq!(body.data[0].product_name, "Evergreen Life");
        }

        // The second upload is served from the cache
        assert_eq!(analyst.metrics_calls.load(Ordering::SeqCst), 1);
        assert_eq!(analyst.summary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analyze_names_unnamed_products_after_file() {
        // Setup test server
        let (app, _analyst) = setup_test_app();
        let server = TestServer::new(app).unwrap();

        // Document without a product name
        let document = r#"{
            "annual_premium": 200.0,
            "payment_years": 2,
            "benefit_table": [{"year": 1, "cash_value": 150.0}]
        }"#;
        let form = MultipartForm::new()
            .add_part("files", upload("quiet_plan.txt", document));
        let response = server.post("/api/analyze").multipart(form).await;

        // Verify the file stem became the product name
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<PlanAnalysis>> = response.json();
        assert_eq!(body.data[0].product_name, "quiet_plan");
        assert!(body.data[0].summary.contains("quiet_plan"));
    }
}
