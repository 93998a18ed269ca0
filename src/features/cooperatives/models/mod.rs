mod cooperative;

pub use cooperative::Cooperative;
