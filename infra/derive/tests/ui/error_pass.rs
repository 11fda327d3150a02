use stagehand_derive::stagehand_error;
use std::borrow::Cow;

#[stagehand_error]
pub enum StoreError {
    #[error("Storage unavailable{}: {source}", format_context(.context))]
    Unavailable {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Invalid option{}: {message}", format_context(.context))]
    InvalidInput { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_snapshot() -> Result<Vec<u8>, StoreError> {
    std::fs::read("/definitely/not/here").context("Reading option snapshot")
}

fn reject() -> Result<(), StoreError> {
    Err(StoreError::InvalidInput { message: "blank value".into(), context: None })
        .context("Adding location")
}

fn main() {
    let err = read_snapshot().unwrap_err();
    assert!(err.to_string().starts_with("Storage unavailable (Reading option snapshot)"));

    let err = reject().unwrap_err();
    assert_eq!(err.to_string(), "Invalid option (Adding location): blank value");

    let err: StoreError = "lost invariant".into();
    assert!(matches!(err, StoreError::Internal { .. }));

    let io = std::io::Error::other("disk gone");
    let err: StoreError = io.into();
    assert!(matches!(err, StoreError::Unavailable { context: None, .. }));
}
