pub mod mock_endpoint;
