mod mock_engine;

pub use mock_engine::{good_payload, MockEngine, RESPONSE_ALLOCATION};
