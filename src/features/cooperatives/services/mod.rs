mod cooperative_service;

pub use cooperative_service::CooperativeService;
