pub mod body;
pub mod config;
pub mod err;
pub mod fallback;
pub mod http;
pub mod mapper;
pub mod opt;
pub mod page;
pub mod routes;
pub mod table;
