mod client_impl;
mod config_rustls;

pub use client_impl::K8Client;
pub use config_rustls::*;
