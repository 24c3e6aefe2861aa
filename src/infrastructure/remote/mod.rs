mod http_api;
mod token_provider;

pub use http_api::HttpRemoteLocationApi;
pub use token_provider::SessionTokenProvider;
