/// URL prefix under which derivative images are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Multipart field carrying the optional business image.
pub const IMAGE_FIELD: &str = "image";

/// File extension of every derivative image.
pub const DERIVATIVE_EXTENSION: &str = "webp";

/// Cache lifetime for public assets (one day).
pub const PUBLIC_ASSET_MAX_AGE_SECS: u64 = 86_400;
