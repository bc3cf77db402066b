//! Classification rules, one per record shape

pub mod error;
pub mod json;
pub mod opcode;
pub mod rpc;
pub mod system;

pub use error::ErrorRule;
pub use json::JsonRule;
pub use opcode::OpcodeRule;
pub use rpc::RpcSendRule;
pub use system::SystemRule;
