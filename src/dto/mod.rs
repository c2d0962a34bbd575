pub mod comment_dto;
pub mod user_dto;
pub mod vacancy_dto;
