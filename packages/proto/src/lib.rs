//! Generated protobuf and gRPC types for the greeter workspace.

pub mod data {
    tonic::include_proto!("data");
}
