//! Stock media provider adapters

mod giphy_client;
mod pexels_client;
mod unsplash_client;

pub use giphy_client::{GiphyClient, GiphyClientConfig};
pub use pexels_client::{PexelsClient, PexelsClientConfig};
pub use unsplash_client::{UnsplashClient, UnsplashClientConfig};
