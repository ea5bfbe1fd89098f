use castellan_derive::castellan_error;
use std::borrow::Cow;

#[castellan_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Route not found{}: {title}", format_context(.context))]
    NotFound { title: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<String, DemoError> {
    let raw = std::fs::read_to_string("missing.toml").context("Reading config")?;
    Ok(raw)
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.code(), "io");
    assert!(err.to_string().contains("(Reading config)"));

    let internal: DemoError = "boom".into();
    assert_eq!(internal.code(), "internal");

    let missing = DemoError::NotFound { title: "Moat".to_owned(), context: None };
    assert_eq!(missing.code(), "not_found");
}
