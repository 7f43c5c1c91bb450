pub mod channel;
pub mod client;
pub mod config;
pub mod description;
pub mod diagnostics;
pub mod error;
pub mod staging;
pub mod tls;

// Re-export generated protobuf types
pub mod proto {
    tonic::include_proto!("stagelink");
}
