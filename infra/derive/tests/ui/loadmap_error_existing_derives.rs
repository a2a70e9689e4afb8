use loadmap_derive::loadmap_error;
use std::borrow::Cow;

#[loadmap_error]
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<std::borrow::Cow<'static, str>> },

    #[error("Unit without context")]
    Plain {},
}

fn main() {
    let err = DemoError::Plain {};
    let _ = format!("{err:?}");
}
