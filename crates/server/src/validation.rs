use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::{Request, StatusCode},
    Json,
};
use axum_derive_error::ErrorResponse;
use derive_more::{Display, Error};
use validator::{Validate, ValidationErrors};

/// Rejections of a [`ValidatedJson`] request body.
#[derive(ErrorResponse, Display, Error)]
pub enum ValidatedJsonRejection {
    /// Request body is not a JSON value of the expected shape.
    #[status(StatusCode::UNPROCESSABLE_ENTITY)]
    #[display(fmt = "malformed request body: {}", _0)]
    MalformedBody(JsonRejection),

    /// Request body fields violate their constraints, e.g. an empty
    /// student name or a negative age.
    #[status(StatusCode::UNPROCESSABLE_ENTITY)]
    #[display(fmt = "invalid request body: {}", _0)]
    InvalidFields(ValidationErrors),
}

/// JSON request body checked with its [`Validate`] implementation.
///
/// Both parsing and validation failures are rejected
/// with `422 Unprocessable Entity`.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S, B> FromRequest<S, B> for ValidatedJson<T>
where
    T: Validate,
    B: Send + 'static,
    S: Sync,
    Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::MalformedBody)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::InvalidFields)?;

        Ok(ValidatedJson(value))
    }
}
