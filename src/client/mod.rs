pub mod http;
pub mod traits;

pub use http::HttpPropertyClient;
pub use traits::PropertyApi;
