//! Application constants and configuration

/// Default base URL for the API gateway fronting both backends.
/// Can be overridden via `gateway_url` in settings.json.
pub const GATEWAY_BASE_URL: &str = "http://localhost:8080";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extensions offered by the native file picker, standing in for the
/// browser's `accept="image/*"` filter. Nothing beyond the picker validates
/// them.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];
