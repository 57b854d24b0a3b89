use crate::{
    csrf::{CSRF_FIELD, CsrfCookie},
    data::student::NewStudent,
    error::{
        DecodeStudentSnafu, MissingTemplateSnafu, ParseClassIdSnafu, ParseFormSnafu,
        RegistrarResult,
    },
    form::FormValues,
    state::RegistrarState,
    templates::{CREATE_STUDENT, create_student::StudentForm},
    validation::{Validate, capitalise},
};
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::{IntoResponse, Redirect, Response},
};
use snafu::{OptionExt, ResultExt};

pub const CREATE_STUDENT_PATH: &str = "/admin/create/student";
pub const CLASS_ID_FIELD: &str = "ClassID";

pub async fn get_create_student(
    State(state): State<RegistrarState>,
    csrf: CsrfCookie,
) -> RegistrarResult<Response> {
    let classes = state.store().get_classes().await?;

    let form = StudentForm {
        classes,
        csrf_token: csrf.issue_token(),
        ..StudentForm::default()
    };
    let response = render_create_template(&state, &form)?;
    csrf.attach(response, state.secure_cookies())
}

pub async fn post_create_student(
    State(state): State<RegistrarState>,
    csrf: CsrfCookie,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> RegistrarResult<Response> {
    let Form(pairs) = form.context(ParseFormSnafu)?;
    let values = FormValues::from(pairs);

    csrf.verify(values.get(CSRF_FIELD))?;

    let mut student: NewStudent = values.decode().context(DecodeStudentSnafu)?;
    let class_id = values.get(CLASS_ID_FIELD).unwrap_or_default();

    if let Err(errors) = student.validate() {
        debug!(?errors, "New student failed validation");
        // only so the re-rendered form keeps the chosen class selected
        student.class_id = class_id.parse().unwrap_or_default();

        let form = StudentForm {
            classes: state.store().get_classes().await?,
            student,
            errors: errors
                .into_iter()
                .map(|(field, error)| (capitalise(&field), error))
                .collect(),
            csrf_token: csrf.issue_token(),
        };
        return render_create_template(&state, &form);
    }

    student.class_id = class_id
        .parse()
        .context(ParseClassIdSnafu { original: class_id })?;

    let created = state.store().create_student(student.trimmed()).await?;
    info!(id = created.id, class_id = created.class_id, "Created student");

    Ok(Redirect::to(&format!("/admin/{}/edit/student", created.id)).into_response())
}

pub fn render_create_template(
    state: &RegistrarState,
    form: &StudentForm,
) -> RegistrarResult<Response> {
    let template = state
        .templates()
        .lookup(CREATE_STUDENT)
        .context(MissingTemplateSnafu {
            name: CREATE_STUDENT,
        })?;

    Ok(template(form).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        csrf::{CSRF_COOKIE, CsrfSecret},
        data::store::memory::MemoryStudentStore,
        routes::router,
        templates::Templates,
    };
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{
            Request, StatusCode,
            header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        },
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: Arc<MemoryStudentStore>) -> Router {
        router(RegistrarState::from_parts(store, Templates::default(), false))
    }

    fn school() -> Arc<MemoryStudentStore> {
        Arc::new(MemoryStudentStore::with_classes(&[
            (3, "Year 7 Maths"),
            (5, "Year 9 Physics"),
        ]))
    }

    struct Browser {
        secret: CsrfSecret,
    }

    impl Browser {
        fn new() -> Self {
            Self {
                secret: CsrfSecret::generate(),
            }
        }

        fn cookie(&self) -> String {
            self.secret.to_cookie(false).stripped().to_string()
        }

        fn get_form(&self) -> Request<Body> {
            Request::builder()
                .uri(CREATE_STUDENT_PATH)
                .header(COOKIE, self.cookie())
                .body(Body::empty())
                .unwrap()
        }

        fn post_form(&self, fields: &str) -> Request<Body> {
            let body = format!("{CSRF_FIELD}={}&{fields}", self.secret.issue_token());
            Request::builder()
                .method("POST")
                .uri(CREATE_STUDENT_PATH)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .header(COOKIE, self.cookie())
                .body(Body::from(body))
                .unwrap()
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn token_in(html: &str) -> String {
        let marker = format!(r#"name="{CSRF_FIELD}" value=""#);
        let start = html.find(&marker).unwrap() + marker.len();
        let len = html[start..].find('"').unwrap();
        html[start..start + len].to_string()
    }

    #[tokio::test]
    async fn show_form_lists_classes_and_sets_cookie() {
        let response = app(school())
            .oneshot(
                Request::builder()
                    .uri(CREATE_STUDENT_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with(CSRF_COOKIE));

        let html = body_string(response).await;
        assert!(html.contains("Year 7 Maths"));
        assert!(html.contains("Year 9 Physics"));
        assert!(!token_in(&html).is_empty());
    }

    #[tokio::test]
    async fn show_form_issues_fresh_tokens() {
        let browser = Browser::new();

        let first = app(school()).oneshot(browser.get_form()).await.unwrap();
        assert!(first.headers().get(SET_COOKIE).is_none());
        let first = token_in(&body_string(first).await);

        let second = app(school()).oneshot(browser.get_form()).await.unwrap();
        let second = token_in(&body_string(second).await);

        assert_ne!(first, second);
        assert!(browser.secret.verify(&first));
        assert!(browser.secret.verify(&second));
    }

    #[tokio::test]
    async fn show_form_fails_when_classes_unavailable() {
        let store = Arc::new(MemoryStudentStore {
            fail_reads: true,
            ..MemoryStudentStore::default()
        });

        let response = app(store).oneshot(Browser::new().get_form()).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "internal server error");
    }

    #[tokio::test]
    async fn missing_template_is_an_internal_error() {
        let state = RegistrarState::from_parts(school(), Templates::empty(), false);

        let response = router(state)
            .oneshot(Browser::new().get_form())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn valid_submission_is_stored_and_redirects() {
        let store = Arc::new(MemoryStudentStore {
            next_id: 42,
            ..MemoryStudentStore::with_classes(&[(3, "Year 7 Maths")])
        });

        let response = app(store.clone())
            .oneshot(Browser::new().post_form("Name=Ada&Email=ada%40example.com&ClassID=3"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/admin/42/edit/student"
        );

        let created = store.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "Ada");
        assert_eq!(created[0].email, "ada@example.com");
        assert_eq!(created[0].class_id, 3);
    }

    #[tokio::test]
    async fn invalid_submission_rerenders_with_errors() {
        let store = school();

        let response = app(store.clone())
            .oneshot(Browser::new().post_form("Name=&Email=nope&ClassID=3"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await;
        assert!(html.contains("Name: cannot be blank"));
        assert!(html.contains("Email: must be a valid email address"));
        assert!(html.contains(r#"value="nope""#));
        assert!(html.contains(r#"<option value="3" selected>Year 7 Maths</option>"#));
        assert!(html.contains("Year 9 Physics"));
        assert!(!token_in(&html).is_empty());

        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn surrounding_whitespace_is_not_stored() {
        let store = school();

        let response = app(store.clone())
            .oneshot(Browser::new().post_form(
                "Name=%20%20Ada%20%20&Email=%20ada%40example.com%20&Phone=%20555-123-4567&ClassID=3",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let created = store.created();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].name, "Ada");
        assert_eq!(created[0].email, "ada@example.com");
        assert_eq!(created[0].phone, "555-123-4567");
    }

    #[tokio::test]
    async fn undecodable_submission_is_not_stored() {
        let store = school();

        let response = app(store.clone())
            .oneshot(Browser::new().post_form(
                "Name=Ada&Name=Grace&Email=ada%40example.com&ClassID=3",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "internal server error");
        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn invalid_submission_fails_when_classes_unavailable() {
        let store = Arc::new(MemoryStudentStore {
            fail_reads: true,
            ..MemoryStudentStore::with_classes(&[(3, "Year 7 Maths")])
        });

        let response = app(store.clone())
            .oneshot(Browser::new().post_form("Name=&Email=ada%40example.com&ClassID=3"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "internal server error");
        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn non_integer_class_is_not_stored() {
        let store = school();

        let response = app(store.clone())
            .oneshot(Browser::new().post_form("Name=Ada&Email=ada%40example.com&ClassID=three"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_is_an_internal_error() {
        let store = Arc::new(MemoryStudentStore {
            fail_writes: true,
            ..MemoryStudentStore::with_classes(&[(3, "Year 7 Maths")])
        });

        let response = app(store)
            .oneshot(Browser::new().post_form("Name=Ada&Email=ada%40example.com&ClassID=3"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "internal server error");
    }

    #[tokio::test]
    async fn submission_without_valid_csrf_token_is_forbidden() {
        let store = school();
        let request = Request::builder()
            .method("POST")
            .uri(CREATE_STUDENT_PATH)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(COOKIE, Browser::new().cookie())
            .body(Body::from(format!(
                "{CSRF_FIELD}={}&Name=Ada&Email=ada%40example.com&ClassID=3",
                CsrfSecret::generate().issue_token()
            )))
            .unwrap();

        let response = app(store.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(store.created().is_empty());
    }

    #[tokio::test]
    async fn non_form_body_is_an_internal_error() {
        let store = school();
        let request = Request::builder()
            .method("POST")
            .uri(CREATE_STUDENT_PATH)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"Name": "Ada"}"#))
            .unwrap();

        let response = app(store.clone()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(store.created().is_empty());
    }
}
