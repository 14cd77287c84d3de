use serde::{Serialize, Serializer};

/// Closed set of outcomes a request can end in.
///
/// Every envelope carries exactly one of these. The numeric code is what
/// clients branch on; the message is meant for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseTemplateStatus {
    Success,

    // 2000: request shape / authentication
    EmptyJwt,
    InvalidJwt,
    InvalidRequestBody,
    InvalidPathParameter,
    InvalidScoreRange,

    // 3000: persistence
    DbError,

    // 8000: community board
    PostNotFound,
    UserNotFound,
    NotAuthor,
    EmptyTitle,
    EmptyContent,

    // 9000: ingredient catalog
    IngredientNotFound,
}

impl ResponseTemplateStatus {
    pub const ALL: [ResponseTemplateStatus; 13] = [
        Self::Success,
        Self::EmptyJwt,
        Self::InvalidJwt,
        Self::InvalidRequestBody,
        Self::InvalidPathParameter,
        Self::InvalidScoreRange,
        Self::DbError,
        Self::PostNotFound,
        Self::UserNotFound,
        Self::NotAuthor,
        Self::EmptyTitle,
        Self::EmptyContent,
        Self::IngredientNotFound,
    ];

    pub fn code(&self) -> u32 {
        match self {
            Self::Success => 1000,
            Self::EmptyJwt => 2001,
            Self::InvalidJwt => 2002,
            Self::InvalidRequestBody => 2003,
            Self::InvalidPathParameter => 2004,
            Self::InvalidScoreRange => 2010,
            Self::DbError => 3000,
            Self::PostNotFound => 8000,
            Self::UserNotFound => 8001,
            Self::NotAuthor => 8004,
            Self::EmptyTitle => 8005,
            Self::EmptyContent => 8006,
            Self::IngredientNotFound => 9000,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Request succeeded.",
            Self::EmptyJwt => "Please provide a JWT.",
            Self::InvalidJwt => "The JWT is invalid or has expired.",
            Self::InvalidRequestBody => "The request body or query string could not be read.",
            Self::InvalidPathParameter => "The path parameter is not a valid identifier.",
            Self::InvalidScoreRange => "The score range start must not exceed its end.",
            Self::DbError => "Database request error.",
            Self::PostNotFound => "The post does not exist.",
            Self::UserNotFound => "User information could not be found.",
            Self::NotAuthor => "Only the author can do this.",
            Self::EmptyTitle => "Please enter a title.",
            Self::EmptyContent => "Please enter the content.",
            Self::IngredientNotFound => "The ingredient does not exist.",
        }
    }

    /// Symbolic name used in logs (`POST_NOT_FOUND`, `NOT_AUTHOR`, ...)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::EmptyJwt => "EMPTY_JWT",
            Self::InvalidJwt => "INVALID_JWT",
            Self::InvalidRequestBody => "INVALID_REQUEST_BODY",
            Self::InvalidPathParameter => "INVALID_PATH_PARAMETER",
            Self::InvalidScoreRange => "INVALID_SCORE_RANGE",
            Self::DbError => "DB_ERROR",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotAuthor => "NOT_AUTHOR",
            Self::EmptyTitle => "EMPTY_TITLE",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::IngredientNotFound => "INGREDIENT_NOT_FOUND",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for ResponseTemplateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.kind(), self.code())
    }
}

// On the wire a status is just its numeric code
impl Serialize for ResponseTemplateStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.code())
    }
}
