//! Infura endpoints.

use chainweb3_core::Network;

/// Infura's subdomain for a network, if Infura serves it.
pub fn network_slug(network: Network) -> Option<&'static str> {
    match network {
        Network::Mainnet => Some("mainnet"),
        Network::Sepolia => Some("sepolia"),
        _ => None,
    }
}

/// `https://{network}.infura.io/v3/{project_id}`
pub fn http_url(project_id: &str, network: Network) -> Option<String> {
    let slug = network_slug(network)?;
    Some(format!("https://{slug}.infura.io/v3/{project_id}"))
}
