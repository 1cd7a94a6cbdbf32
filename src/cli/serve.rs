use std::net::SocketAddr;

use crate::{config::Config, error, server};

pub async fn serve(mut config: Config, address: Option<SocketAddr>) {
    if let Some(address) = address {
        config.server_address = address;
    }

    if let Err(e) = server::serve(config).await {
        error!("Server stopped. Err: {}", e);
    }
}
