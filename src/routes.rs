use crate::{
    routes::{
        create_student::{CREATE_STUDENT_PATH, get_create_student, post_create_student},
        edit_student::get_edit_student,
        index::get_index_route,
    },
    state::RegistrarState,
};
use axum::{Router, routing::get};

pub mod create_student;
pub mod edit_student;
pub mod index;

pub fn router(state: RegistrarState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route(
            CREATE_STUDENT_PATH,
            get(get_create_student).post(post_create_student),
        )
        .route("/admin/{id}/edit/student", get(get_edit_student))
        .with_state(state)
}
