pub mod charset;
pub mod http_client;
pub mod url;

pub use charset::decode_body;
pub use http_client::build_http_client;
pub use url::UrlUtils;
