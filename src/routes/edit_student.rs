use crate::{
    error::{MissingStudentSnafu, RegistrarResult},
    maud_conveniences::{page, title},
    routes::create_student::CREATE_STUDENT_PATH,
    state::RegistrarState,
};
use axum::extract::{Path, State};
use maud::{Markup, html};
use snafu::OptionExt;

pub async fn get_edit_student(
    State(state): State<RegistrarState>,
    Path(id): Path<i32>,
) -> RegistrarResult<Markup> {
    let student = state
        .store()
        .get_student(id)
        .await?
        .context(MissingStudentSnafu { id })?;
    let class = state.store().get_class(student.class_id).await?;

    Ok(page(
        &student.name,
        html! {
            div class="rounded-lg shadow-md overflow-hidden bg-gray-800 max-w-md w-full mx-auto p-4" {
                (title(&student.name))

                p class="text-gray-200 font-semibold" {
                    "Class: "
                    span class="font-medium" {
                        @if let Some(class) = class {
                            (class.name)
                        } @else {
                            span class="italic" {"Unknown"}
                        }
                    }
                }
                p {
                    a href={"mailto:" (student.email)} class="text-blue-500" {(student.email)}
                }
                @if !student.phone.is_empty() {
                    p class="text-gray-200" {(student.phone)}
                }

                br;
                a href=(CREATE_STUDENT_PATH) class="bg-blue-600 hover:bg-blue-800 font-bold py-2 px-4 rounded" {
                    "Add another Student"
                }
            }
        },
    ))
}
