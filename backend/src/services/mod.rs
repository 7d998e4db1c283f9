pub mod greeting_service;

pub use greeting_service::GreetingService;
