mod city;
mod province;
mod subdistrict;

pub use city::City;
pub use province::Province;
pub use subdistrict::Subdistrict;
