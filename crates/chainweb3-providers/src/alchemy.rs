//! Alchemy endpoints.

use chainweb3_core::Network;

pub fn network_slug(network: Network) -> Option<&'static str> {
    match network {
        Network::Mainnet => Some("eth-mainnet"),
        Network::Sepolia => Some("eth-sepolia"),
        _ => None,
    }
}

/// `https://{network}.g.alchemy.com/v2/{api_key}`
pub fn http_url(api_key: &str, network: Network) -> Option<String> {
    let slug = network_slug(network)?;
    Some(format!("https://{slug}.g.alchemy.com/v2/{api_key}"))
}
