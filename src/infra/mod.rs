// Adapters behind the app ports

pub mod http_client;

pub use http_client::QeventClient;
