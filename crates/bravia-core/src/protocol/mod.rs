//! Typed messages for the TV's JSON-RPC API.

pub mod jsonrpc;

pub use jsonrpc::{
    decode_remote_controller_info, JsonRpcRequest, JsonRpcResponse, ProtocolError, Service,
};
