pub mod auth;
pub mod comment;
pub mod follow;
pub mod like;
pub mod rating;
pub mod recipe;
pub mod report;
pub mod tag;
