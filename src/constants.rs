//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1400.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 860.0;

/// Storage key for the serialized edit history
pub const SESSION_KEY: &str = "edit_history";

/// Storage key prefix for per-account minted NFT records
pub const MINTED_KEY_PREFIX: &str = "minted_nfts:";

pub const DEFAULT_IMAGE_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Local minting gateway (wallet + IPFS + contract relay)
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8787";

pub const DEFAULT_NETWORK: &str = "sepolia";
