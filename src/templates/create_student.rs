use crate::{
    csrf::CSRF_FIELD,
    data::{class::Class, student::NewStudent},
    maud_conveniences::{
        field_error, form_element, form_submit_button, page, simple_form_element, title,
    },
    routes::create_student::{CLASS_ID_FIELD, CREATE_STUDENT_PATH},
    validation::FieldErrors,
};
use maud::{Markup, html};

/// Everything the create-student page needs for one render. Built per request.
#[derive(Debug, Default)]
pub struct StudentForm {
    pub classes: Vec<Class>,
    pub student: NewStudent,
    pub errors: FieldErrors,
    pub csrf_token: String,
}

impl StudentForm {
    fn error_for(&self, field: &str) -> Option<Markup> {
        self.errors
            .get(field)
            .map(|error| field_error(field, &error.to_string()))
    }
}

pub fn create_student_template(form: &StudentForm) -> Markup {
    let content = html! {
        div class="bg-gray-800 shadow-md rounded px-8 pt-6 pb-8 mb-4 w-full max-w-md" {
            (title("Add New Student"))

            @if !form.errors.is_empty() {
                div role="alert" class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" {
                    strong class="font-bold" {"Please fix the highlighted fields."}
                }
            }

            form method="post" action=(CREATE_STUDENT_PATH) {
                input type="hidden" name=(CSRF_FIELD) value=(form.csrf_token) {}

                (simple_form_element("Name", "Name", true, None, &form.student.name, form.error_for("Name")))
                (simple_form_element("Email", "Email", true, Some("email"), &form.student.email, form.error_for("Email")))
                (simple_form_element("Phone", "Phone (optional)", false, Some("tel"), &form.student.phone, form.error_for("Phone")))

                (form_element(CLASS_ID_FIELD, "Class", html! {
                    select id=(CLASS_ID_FIELD) name=(CLASS_ID_FIELD) class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {
                        @for class in &form.classes {
                            option value=(class.id) selected[class.id == form.student.class_id] {(class.name)}
                        }
                    }
                }, None))

                (form_submit_button(Some("Add Student")))
            }
        }
    };

    page("Add New Student", content)
}
