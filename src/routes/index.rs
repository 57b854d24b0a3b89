use crate::{
    error::RegistrarResult,
    maud_conveniences::{page, title},
    routes::create_student::CREATE_STUDENT_PATH,
    state::RegistrarState,
};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RegistrarState>) -> RegistrarResult<Markup> {
    let students = state.store().get_students().await?;

    Ok(page("Registrar", html! {
        div class="bg-gray-800 p-8 rounded shadow-md max-w-md w-full" {
            (title("Registrar"))

            @if students.is_empty() {
                p class="italic text-gray-400 mb-4" {"No students yet."}
            } @else {
                ul class="mb-4 space-y-1" {
                    @for student in &students {
                        li {
                            a href={"/admin/" (student.id) "/edit/student"} class="hover:text-blue-400 underline" {(student.name)}
                        }
                    }
                }
            }

            div class="flex flex-row space-x-4 justify-center" {
                a href=(CREATE_STUDENT_PATH) class="bg-slate-600 hover:bg-slate-800 font-bold py-2 px-4 rounded" {
                    "Add Student"
                }
            }
        }
    }))
}
