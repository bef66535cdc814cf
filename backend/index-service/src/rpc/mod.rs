/// gRPC message surfaces shared with neighbouring services
pub mod auth;
