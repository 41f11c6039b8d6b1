//! Small free-standing helpers shared by `linstor-proto` and `linstor-client`.

mod assert;
mod host_port;

pub use host_port::split_host_port;
