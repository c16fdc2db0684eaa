pub mod json;

pub use json::QnaJson;
