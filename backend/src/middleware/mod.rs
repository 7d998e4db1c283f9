pub mod locale;

pub use locale::request_culture_middleware;
