pub mod analysis;
pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;
