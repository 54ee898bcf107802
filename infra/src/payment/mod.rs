//! Payment gateway clients

pub mod midtrans;

pub use midtrans::MidtransGateway;
