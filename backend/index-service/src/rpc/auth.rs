//! Authentication messages (`auth.Authenticate`, proto3).
//!
//! The auth gateway shares the user store with the index service. Only the
//! wire contract lives here; token issuance is owned by the gateway.

use async_trait::async_trait;
use tonic::Status;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub phone_num: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UserVerify {
    #[prost(string, tag = "1")]
    pub phone_num: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub verification_code: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoginReply {
    #[prost(int32, tag = "1")]
    pub status_code: i32,
    #[prost(string, tag = "2")]
    pub token: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ActionReply {
    #[prost(int32, tag = "1")]
    pub status_code: i32,
}

/// Server side of `auth.Authenticate`
#[async_trait]
pub trait Authenticate: Send + Sync + 'static {
    async fn pre_login(&self, request: User) -> Result<ActionReply, Status>;

    async fn login(&self, request: User) -> Result<LoginReply, Status>;

    async fn logout(&self, request: User) -> Result<ActionReply, Status>;
}
