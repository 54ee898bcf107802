//! On-chain certificate minting

pub mod relay;

pub use relay::RelayCertificateMinter;
