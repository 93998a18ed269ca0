mod cooperative_dto;

pub use cooperative_dto::*;
