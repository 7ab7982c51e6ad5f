// Adapters layer: translation between hosting runtimes and the request handler.

pub mod api_gateway;
