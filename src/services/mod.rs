/// Business logic services
pub mod birthday_service;
