use crate::templates::create_student::{StudentForm, create_student_template};
use maud::Markup;
use std::{collections::HashMap, sync::Arc};

pub mod create_student;

pub const CREATE_STUDENT: &str = "create-student.html";

pub type Template = fn(&StudentForm) -> Markup;

/// Named page templates, looked up at request time.
#[derive(Clone, Debug)]
pub struct Templates(Arc<HashMap<&'static str, Template>>);

impl Templates {
    pub fn empty() -> Self {
        Self(Arc::new(HashMap::new()))
    }

    pub fn with(self, name: &'static str, template: Template) -> Self {
        let mut map = Arc::unwrap_or_clone(self.0);
        map.insert(name, template);
        Self(Arc::new(map))
    }

    pub fn lookup(&self, name: &str) -> Option<Template> {
        self.0.get(name).copied()
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::empty().with(CREATE_STUDENT, create_student_template)
    }
}
