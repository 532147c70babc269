pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and the non-file fields on top of the
/// resume itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            post(handlers::handle_upload).get(handlers::handle_list_resumes),
        )
        .route("/api/v1/resumes/:id", get(handlers::handle_get_resume))
        .route(
            "/api/v1/profile/skills",
            get(handlers::handle_get_profile_skills),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::parser::decoder::{DocumentDecoder, PageText, PdfDecoder};
    use crate::parser::skills::SkillMatcher;
    use crate::parser::vocabulary::SkillVocabulary;
    use crate::parser::{ExtractionError, ResumeParser};
    use crate::resumes::ingest::EXTRACTION_WARNING;
    use crate::resumes::store::memory::InMemoryResumeStore;

    const BOUNDARY: &str = "resume-api-test-boundary";

    struct FixedPages(Vec<&'static str>);

    impl DocumentDecoder for FixedPages {
        fn open_and_extract_pages(&self, _bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
            Ok(self.0.iter().map(|p| PageText::from_raw(p)).collect())
        }
    }

    struct Harness {
        app: Router,
        upload_root: TempDir,
    }

    fn harness(decoder: impl DocumentDecoder + 'static, max_upload_bytes: usize) -> Harness {
        let upload_root = tempfile::tempdir().unwrap();
        let matcher = SkillMatcher::new(&SkillVocabulary::builtin()).unwrap();
        let state = AppState {
            store: Arc::new(InMemoryResumeStore::default()),
            parser: ResumeParser::new(Arc::new(decoder), Arc::new(matcher)),
            config: Config {
                database_url: "postgres://unused".to_string(),
                port: 0,
                rust_log: "debug".to_string(),
                upload_dir: upload_root.path().to_path_buf(),
                max_upload_bytes,
                extract_timeout: Duration::from_secs(5),
            },
        };
        Harness {
            app: build_router(state),
            upload_root,
        }
    }

    fn resume_harness() -> Harness {
        harness(
            FixedPages(vec![
                "Jane Doe\nStaff Engineer",
                "Rust, Kubernetes and PostgreSQL\nMentoring",
            ]),
            1024 * 1024,
        )
    }

    fn multipart_body(user_id: Option<&str>, file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(user_id) = user_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"user_id\"\r\n\r\n{user_id}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some((filename, content_type, bytes)) = file {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn pdf_upload(user_id: Uuid) -> Request<Body> {
        upload_request(multipart_body(
            Some(&user_id.to_string()),
            Some(("Jane Doe CV.pdf", "application/pdf", &b"%PDF-1.7 stub"[..])),
        ))
    }

    #[tokio::test]
    async fn test_health() {
        let h = resume_harness();
        let response = h.app.oneshot(get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-api");
    }

    #[tokio::test]
    async fn test_upload_extracts_skills_and_stores_file() {
        let h = resume_harness();
        let user_id = Uuid::new_v4();

        let response = h.app.clone().oneshot(pdf_upload(user_id)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        let skills: Vec<&str> = body["skills"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s.as_str().unwrap())
            .collect();
        assert_eq!(skills, vec!["Rust", "Postgresql", "Kubernetes", "Mentoring"]);
        assert_eq!(body["skill_count"], 4);
        assert_eq!(body["filename"], "Jane Doe CV.pdf");
        assert!(body["warning"].is_null());
        assert_eq!(
            body["summary"],
            "Jane Doe Staff Engineer Rust, Kubernetes and PostgreSQL Mentoring..."
        );

        let resume_id = body["resume_id"].as_str().unwrap();
        let stored = h
            .upload_root
            .path()
            .join(user_id.to_string())
            .join(format!("{resume_id}.pdf"));
        assert_eq!(std::fs::read(stored).unwrap(), b"%PDF-1.7 stub");
    }

    #[tokio::test]
    async fn test_upload_merges_profile_skills() {
        let h = resume_harness();
        let user_id = Uuid::new_v4();

        h.app.clone().oneshot(pdf_upload(user_id)).await.unwrap();
        let second = h.app.clone().oneshot(pdf_upload(user_id)).await.unwrap();
        let body = json_body(second).await;
        assert_eq!(body["profile_skills"].as_array().unwrap().len(), 4);

        let response = h
            .app
            .oneshot(get_request(&format!(
                "/api/v1/profile/skills?user_id={user_id}"
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let profile = json_body(response).await;
        assert_eq!(profile["skills"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_corrupt_pdf_falls_back_to_empty_result() {
        let h = harness(PdfDecoder, 1024 * 1024);
        let user_id = Uuid::new_v4();
        let request = upload_request(multipart_body(
            Some(&user_id.to_string()),
            Some(("broken.pdf", "application/pdf", &b"definitely not a pdf"[..])),
        ));

        let response = h.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        assert_eq!(body["skill_count"], 0);
        assert!(body["skills"].as_array().unwrap().is_empty());
        assert_eq!(body["summary"], "");
        assert_eq!(body["warning"], EXTRACTION_WARNING);

        let resume_id = body["resume_id"].as_str().unwrap();
        let response = h
            .app
            .oneshot(get_request(&format!("/api/v1/resumes/{resume_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let row = json_body(response).await;
        assert_eq!(row["extraction_warning"], EXTRACTION_WARNING);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf() {
        let h = resume_harness();
        let request = upload_request(multipart_body(
            Some(&Uuid::new_v4().to_string()),
            Some(("resume.txt", "text/plain", &b"Rust developer"[..])),
        ));
        let response = h.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_upload_requires_user_id() {
        let h = resume_harness();
        let request = upload_request(multipart_body(
            None,
            Some(("resume.pdf", "application/pdf", &b"%PDF-1.7"[..])),
        ));
        let response = h.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_user_id() {
        let h = resume_harness();
        let request = upload_request(multipart_body(
            Some("not-a-uuid"),
            Some(("resume.pdf", "application/pdf", &b"%PDF-1.7"[..])),
        ));
        let response = h.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_requires_file() {
        let h = resume_harness();
        let request = upload_request(multipart_body(Some(&Uuid::new_v4().to_string()), None));
        let response = h.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_rejects_oversize_file() {
        let h = harness(FixedPages(vec![]), 16);
        let request = upload_request(multipart_body(
            Some(&Uuid::new_v4().to_string()),
            Some(("resume.pdf", "application/pdf", &[b'x'; 64][..])),
        ));
        let response = h.app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_get_unknown_resume_is_404() {
        let h = resume_harness();
        let response = h
            .app
            .oneshot(get_request(&format!("/api/v1/resumes/{}", Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_resumes_for_user() {
        let h = resume_harness();
        let user_id = Uuid::new_v4();
        h.app.clone().oneshot(pdf_upload(user_id)).await.unwrap();
        h.app.clone().oneshot(pdf_upload(user_id)).await.unwrap();
        h.app.clone().oneshot(pdf_upload(Uuid::new_v4())).await.unwrap();

        let response = h
            .app
            .oneshot(get_request(&format!("/api/v1/resumes?user_id={user_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r["user_id"] == user_id.to_string()));
    }

    #[tokio::test]
    async fn test_profile_skills_empty_for_new_user() {
        let h = resume_harness();
        let user_id = Uuid::new_v4();
        let response = h
            .app
            .oneshot(get_request(&format!(
                "/api/v1/profile/skills?user_id={user_id}"
            )))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert!(body["skills"].as_array().unwrap().is_empty());
    }
}
