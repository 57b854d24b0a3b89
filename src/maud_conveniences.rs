use maud::{DOCTYPE, Markup, Render, html};

pub fn page(page_title: &str, markup: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8" {}
                meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                title { (page_title) " - Registrar" }
            }
            body class="bg-gray-900 min-h-screen flex flex-col items-center justify-center text-white" {
                nav class="w-full max-w-4xl flex flex-row space-x-4 p-4" {
                    a href="/" class="hover:text-blue-400" {"Home"}
                    a href="/admin/create/student" class="hover:text-blue-400" {"New Student"}
                }
                (markup)
            }
        }
    }
}

pub fn title(s: impl Render) -> Markup {
    html! {
        h1 class="text-2xl font-semibold mb-4" {(s)}
    }
}

pub fn form_element(id: &str, label: &str, input: Markup, error: Option<Markup>) -> Markup {
    html! {
        div class="mb-4" {
            label for=(id) class="block text-sm font-bold mb-2 text-gray-300" {(label)}
            (input)
            @if let Some(error) = error {
                (error)
            }
        }
    }
}

pub fn simple_form_element(
    id: &str,
    label: &str,
    required: bool,
    ty: Option<&str>,
    value: &str,
    error: Option<Markup>,
) -> Markup {
    form_element(
        id,
        label,
        html! {
            input required[required] type=(ty.unwrap_or("text")) id=(id) name=(id) value=(value) class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {}
        },
        error,
    )
}

pub fn form_submit_button(text: Option<&str>) -> Markup {
    html! {
        div class="flex items-center justify-between" {
            button type="submit" class="bg-blue-500 hover:bg-blue-700 font-bold py-2 px-4 rounded focus:outline-none focus:shadow-outline" {
                (text.unwrap_or("Submit"))
            }
        }
    }
}

pub fn field_error(field: &str, message: &str) -> Markup {
    html! {
        p class="text-red-400 text-sm italic mt-1" data-field=(field) {
            (field) ": " (message)
        }
    }
}
