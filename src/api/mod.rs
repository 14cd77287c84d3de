pub mod dto;
pub mod response;
pub mod status;

pub use response::ResponseTemplate;
pub use status::ResponseTemplateStatus;
