pub mod http;

pub use http::HttpProbe;
