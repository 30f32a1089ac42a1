pub mod http;

pub use http::{ApiState, routes, serve};
