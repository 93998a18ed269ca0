mod application_request;

pub use application_request::{ApplicationRequest, ApplicationStatus, ApplicationType};
